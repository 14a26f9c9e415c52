// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod subcommand;
mod subcommands;

use clap::Parser;

use crate::cli_shared::cli::LogConfig;
use crate::cli_shared::logger;
use crate::rpc_client::ApiInfo;

use self::subcommands::*;

/// CLI structure generated when interacting with the cfsctl binary.
#[derive(Parser)]
#[command(
    name = "cfsctl",
    version = env!("CARGO_PKG_VERSION"),
    about = "command line client for a cfs node",
    author = env!("CARGO_PKG_AUTHORS")
)]
pub struct Cli {
    #[command(flatten)]
    pub opts: CliOpts,
    #[command(subcommand)]
    pub cmd: Subcommand,
}

#[derive(Debug, clap::Args)]
pub struct CliOpts {
    /// Address of the cfs node server
    #[arg(long, default_value = "localhost:15524")]
    pub address: String,
    /// Client identifier sent in every request header
    #[arg(long, default_value_t = 0)]
    pub client_id: i64,
}

/// cfsctl sub-commands available.
#[derive(clap::Subcommand)]
pub enum Subcommand {
    /// Read data from a cfs node
    Read(ReadCommand),

    /// Write data to a cfs node
    Write(WriteCommand),

    /// Rename a file or directory
    Rename(RenameCommand),

    /// Remove a file or directory
    Remove(RemoveCommand),

    /// List a directory
    #[command(name = "readdir")]
    ReadDir(ReadDirCommand),

    /// Create a directory
    Mkdir(MkdirCommand),

    /// Show file metadata
    Stat(StatCommand),

    /// List the disks served by a node
    Disks(DisksCommand),

    /// Copy a file through the node
    Copy(CopyCommand),

    /// Flush files to stable storage
    Sync(SyncCommand),

    /// Display node stats
    Stats(StatsCommand),
}

/// Convert a reply-level error string into a process failure.
fn check_reply_err(op: &str, error: Option<String>) -> anyhow::Result<()> {
    match error {
        Some(e) => anyhow::bail!("{op} failed: {e}"),
        None => Ok(()),
    }
}

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let Cli { opts, cmd } = Cli::parse();
    logger::setup_logger(&LogConfig::default());

    let api = ApiInfo::from_address(&opts.address, opts.client_id)?;
    subcommand::process(cmd, &api).await
}
