// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! The `cfsd` daemon: binds the configured disks, the quota checkpoint
//! task, the metrics endpoint and the JSON-RPC server, then waits for
//! ctrl-c.

use std::collections::HashMap;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::cli_shared::cli::{read_config, Config, DiskConfig};
use crate::cli_shared::logger;
use crate::disk::Disk;
use crate::enforce::QuotaGate;
use crate::rpc::{start_rpc, RPCState};
use crate::stats::{self, CounterStore};

/// Daemon command-line options.
#[derive(Debug, Parser)]
#[command(
    name = "cfsd",
    version = env!("CARGO_PKG_VERSION"),
    about = "cfs node daemon",
    author = env!("CARGO_PKG_AUTHORS")
)]
struct DaemonOpts {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let opts = DaemonOpts::parse();
    let config = read_config(opts.config.as_deref())?;
    logger::setup_logger(&config.log);
    start(config).await
}

/// Starts the daemon and blocks until shutdown.
pub async fn start(config: Config) -> anyhow::Result<()> {
    info!("starting cfs daemon, version {}", env!("CARGO_PKG_VERSION"));

    let stats = Arc::new(CounterStore::default());
    let quota = QuotaGate::new(Arc::clone(&stats));

    let mut disks = HashMap::new();
    for disk_config in &config.disks {
        let disk = add_disk(disk_config)?;
        disks.insert(disk_config.name.clone(), disk);
    }
    for q in &config.quotas {
        quota.set_quota(q.client_id, q.ops_per_second);
        info!(
            client_id = q.client_id,
            ops_per_second = q.ops_per_second,
            "installed client quota"
        );
    }

    let mut services: JoinSet<anyhow::Result<()>> = JoinSet::new();

    let metrics_listener = tokio::net::TcpListener::bind(config.metrics_address)
        .await
        .with_context(|| format!("could not bind to {}", config.metrics_address))?;
    info!("metrics endpoint started at {}", config.metrics_address);
    {
        let stats = Arc::clone(&stats);
        services.spawn(async move { stats::init_metrics_endpoint(metrics_listener, stats).await });
    }
    {
        let quota = Arc::clone(&quota);
        services.spawn(async move {
            quota.refresh_loop().await;
            Ok(())
        });
    }

    let listen: SocketAddr = format!("{}:{}", config.bind, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.bind, config.port))?;
    let state = RPCState {
        disks,
        stats,
        quota,
    };
    let (addr, handle) = start_rpc(state, listen).await?;
    info!("JSON-RPC endpoint started at {addr}");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("shutting down");
        }
        res = services.join_next() => {
            if let Some(Ok(Err(e))) = res {
                error!("service failure: {e}");
            }
        }
    }

    services.shutdown().await;
    let _ = handle.stop();
    handle.stopped().await;
    Ok(())
}

/// Bind a disk to its root directory, creating the root (mode 0700) when
/// missing.
fn add_disk(config: &DiskConfig) -> anyhow::Result<Disk> {
    let disk = Disk::new(&config.name, &config.root, config.block_size)
        .with_context(|| format!("invalid block size for disk `{}`", config.name))?;

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder
        .create(&config.root)
        .with_context(|| format!("cannot create root `{}`", config.root.display()))?;

    let root = fs::canonicalize(&config.root).unwrap_or_else(|_| config.root.clone());
    info!("created disk[{}] at root path[{}]", config.name, root.display());
    Ok(disk)
}
