// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::cli::check_reply_err;
use crate::rpc_client::ApiInfo;

#[derive(Debug, clap::Args)]
pub struct ReadDirCommand {
    /// Logical name `<disk>/<path>` of the directory
    #[arg(short, long)]
    name: String,
}

impl ReadDirCommand {
    pub async fn run(&self, api: &ApiInfo) -> anyhow::Result<()> {
        let reply = api.readdir(&self.name).await?;
        check_reply_err("readdir", reply.error)?;
        for info in reply.file_infos {
            let kind = if info.is_dir { "d" } else { "-" };
            println!("{kind} {:>12} {}", info.size, info.name);
        }
        Ok(())
    }
}
