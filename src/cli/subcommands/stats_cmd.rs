// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::cli::check_reply_err;
use crate::rpc_client::ApiInfo;

#[derive(Debug, clap::Args)]
pub struct StatsCommand {}

impl StatsCommand {
    pub async fn run(&self, api: &ApiInfo) -> anyhow::Result<()> {
        let info = api.container_info().await?;
        check_reply_err("container info", info.error)?;
        println!("container info: {}", info.info);

        let metrics = api.metrics().await?;
        for counter in metrics.counters {
            println!("{} {}", counter.name, counter.value);
        }
        Ok(())
    }
}
