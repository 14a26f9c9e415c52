// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use anyhow::Context as _;

use crate::cli::check_reply_err;
use crate::rpc_client::ApiInfo;

#[derive(Debug, clap::Args)]
pub struct StatCommand {
    /// Logical name `<disk>/<path>` to stat
    #[arg(short, long)]
    name: String,
}

impl StatCommand {
    pub async fn run(&self, api: &ApiInfo) -> anyhow::Result<()> {
        let reply = api.stat(&self.name).await?;
        check_reply_err("stat", reply.error)?;
        let info = reply.file_info.context("stat reply carried no file info")?;
        println!("name:   {}", info.name);
        println!("size:   {}", info.size);
        println!("is_dir: {}", info.is_dir);
        Ok(())
    }
}
