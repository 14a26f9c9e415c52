// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::cli::check_reply_err;
use crate::rpc_client::ApiInfo;

#[derive(Debug, clap::Args)]
pub struct MkdirCommand {
    /// Logical name `<disk>/<path>` of the directory to create
    #[arg(short, long)]
    name: String,
    /// Create missing parent directories as needed
    #[arg(long)]
    all: bool,
}

impl MkdirCommand {
    pub async fn run(&self, api: &ApiInfo) -> anyhow::Result<()> {
        let reply = api.mkdir(&self.name, self.all).await?;
        check_reply_err("mkdir", reply.error)?;
        println!("created {}", self.name);
        Ok(())
    }
}
