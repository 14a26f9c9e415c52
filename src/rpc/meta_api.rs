// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use jsonrpsee::types::Params;

use super::error::ServerError;
use super::types::{DiskInfo, DisksReply};
use super::Ctx;

pub async fn disks(_params: Params<'_>, ctx: Ctx) -> Result<DisksReply, ServerError> {
    let mut disks: Vec<DiskInfo> = ctx
        .disks
        .keys()
        .map(|name| DiskInfo { name: name.clone() })
        .collect();
    disks.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(DisksReply { disks })
}
