// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::cli::check_reply_err;
use crate::rpc_client::ApiInfo;

#[derive(Debug, clap::Args)]
pub struct RemoveCommand {
    /// Logical name `<disk>/<path>` to remove
    #[arg(short, long)]
    name: String,
    /// Remove a directory and its contents recursively
    #[arg(long)]
    all: bool,
}

impl RemoveCommand {
    pub async fn run(&self, api: &ApiInfo) -> anyhow::Result<()> {
        let reply = api.remove(&self.name, self.all).await?;
        check_reply_err("remove", reply.error)?;
        println!("removed {}", self.name);
        Ok(())
    }
}
