// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use jsonrpsee::types::Params;
use tokio::task::spawn_blocking;

use super::error::ServerError;
use super::types::{ContainerInfoReply, MetricsReply};
use super::Ctx;
use crate::stats::container_report;

pub async fn container_info(_params: Params<'_>, ctx: Ctx) -> Result<ContainerInfoReply, ServerError> {
    // Walking the disk roots hits the filesystem, so keep it off the
    // reactor.
    let reply = spawn_blocking(move || {
        let report = container_report(&ctx.disks);
        match serde_json::to_string(&report) {
            Ok(info) => ContainerInfoReply { info, error: None },
            Err(e) => ContainerInfoReply {
                info: String::new(),
                error: Some(e.to_string()),
            },
        }
    })
    .await?;
    Ok(reply)
}

pub async fn metrics(_params: Params<'_>, ctx: Ctx) -> Result<MetricsReply, ServerError> {
    Ok(MetricsReply {
        counters: ctx.stats.snapshot(),
    })
}
