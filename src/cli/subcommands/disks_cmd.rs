// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::rpc_client::ApiInfo;

#[derive(Debug, clap::Args)]
pub struct DisksCommand {}

impl DisksCommand {
    pub async fn run(&self, api: &ApiInfo) -> anyhow::Result<()> {
        let reply = api.disks().await?;
        for disk in reply.disks {
            println!("{}", disk.name);
        }
        Ok(())
    }
}
