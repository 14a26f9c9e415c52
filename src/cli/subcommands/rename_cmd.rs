// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::cli::check_reply_err;
use crate::rpc_client::ApiInfo;

#[derive(Debug, clap::Args)]
pub struct RenameCommand {
    /// Current logical name `<disk>/<path>`
    #[arg(long)]
    oldname: String,
    /// New logical name on the same disk
    #[arg(long)]
    newname: String,
}

impl RenameCommand {
    pub async fn run(&self, api: &ApiInfo) -> anyhow::Result<()> {
        let reply = api.rename(&self.oldname, &self.newname).await?;
        check_reply_err("rename", reply.error)?;
        println!("renamed {} to {}", self.oldname, self.newname);
        Ok(())
    }
}
