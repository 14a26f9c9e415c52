// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::rpc_client::ApiInfo;

#[derive(Debug, clap::Args)]
pub struct SyncCommand {
    /// Logical name `<disk>/<path>` to flush; may be repeated
    #[arg(short, long = "name")]
    names: Vec<String>,
}

impl SyncCommand {
    pub async fn run(&self, api: &ApiInfo) -> anyhow::Result<()> {
        let reply = api.sync(self.names.clone()).await?;
        let mut failed = false;
        for (name, error) in self.names.iter().zip(reply.errors) {
            match error {
                Some(e) => {
                    failed = true;
                    eprintln!("sync {name} failed: {e}");
                }
                None => println!("sync {name} succeeded"),
            }
        }
        if failed {
            anyhow::bail!("sync failed");
        }
        Ok(())
    }
}
