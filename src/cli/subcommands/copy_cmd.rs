// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::rpc_client::ApiInfo;

#[derive(Debug, clap::Args)]
pub struct CopyCommand {
    /// Source logical name `<disk>/<path>`
    #[arg(short, long)]
    src: String,
    /// Target logical name `<disk>/<path>`
    #[arg(short, long)]
    dst: String,
}

impl CopyCommand {
    pub async fn run(&self, api: &ApiInfo) -> anyhow::Result<()> {
        let copied = api.copy(&self.src, &self.dst).await?;
        println!("copy {} => {} succeeded ({copied} bytes)", self.src, self.dst);
        Ok(())
    }
}
