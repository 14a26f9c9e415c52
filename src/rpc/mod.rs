// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! JSON-RPC surface of the daemon. Handlers resolve the disk from the
//! logical name, consult the quota gate, and drive the disk engines on
//! the blocking-work pool so file I/O never stalls the reactor.

pub mod error;
mod file_api;
mod meta_api;
mod stats_api;
pub mod types;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use jsonrpsee::server::{RpcModule, Server, ServerHandle};
use jsonrpsee::types::ErrorObjectOwned;

use crate::disk::{split_disk_path, Disk, Error};
use crate::enforce::QuotaGate;
use crate::stats::CounterStore;

pub const CFS_WRITE: &str = "Cfs.Write";
pub const CFS_READ: &str = "Cfs.Read";
pub const CFS_RENAME: &str = "Cfs.Rename";
pub const CFS_REMOVE: &str = "Cfs.Remove";
pub const CFS_READDIR: &str = "Cfs.ReadDir";
pub const CFS_MKDIR: &str = "Cfs.Mkdir";
pub const CFS_STAT: &str = "Cfs.Stat";
pub const CFS_SYNC: &str = "Cfs.Sync";
pub const CFS_DISKS: &str = "Cfs.Disks";
pub const CFS_CONTAINER_INFO: &str = "Cfs.ContainerInfo";
pub const CFS_METRICS: &str = "Cfs.Metrics";

/// State shared by every RPC handler.
pub struct RPCState {
    pub disks: HashMap<String, Disk>,
    pub stats: Arc<CounterStore>,
    pub quota: Arc<QuotaGate>,
}

impl RPCState {
    /// Resolve a logical `<disk>/<path>` name against the configured
    /// disks.
    pub fn resolve_name(&self, name: &str) -> Result<(&Disk, String), Error> {
        let (disk_id, rel) = split_disk_path(name)?;
        let disk = self
            .disks
            .get(&disk_id)
            .ok_or_else(|| Error::BadName(name.to_string()))?;
        Ok((disk, rel))
    }
}

pub type Ctx = Arc<RPCState>;

/// Bind the server and register every method. Returns the bound address
/// (useful with port 0) and the handle that keeps the server alive.
pub async fn start_rpc(state: RPCState, listen: SocketAddr) -> anyhow::Result<(SocketAddr, ServerHandle)> {
    let server = Server::builder().build(listen).await?;
    let addr = server.local_addr()?;

    let mut module = RpcModule::new(state);
    module.register_async_method(CFS_WRITE, |params, ctx, _| async move {
        file_api::write(params, ctx).await.map_err(ErrorObjectOwned::from)
    })?;
    module.register_async_method(CFS_READ, |params, ctx, _| async move {
        file_api::read(params, ctx).await.map_err(ErrorObjectOwned::from)
    })?;
    module.register_async_method(CFS_RENAME, |params, ctx, _| async move {
        file_api::rename(params, ctx).await.map_err(ErrorObjectOwned::from)
    })?;
    module.register_async_method(CFS_REMOVE, |params, ctx, _| async move {
        file_api::remove(params, ctx).await.map_err(ErrorObjectOwned::from)
    })?;
    module.register_async_method(CFS_READDIR, |params, ctx, _| async move {
        file_api::readdir(params, ctx).await.map_err(ErrorObjectOwned::from)
    })?;
    module.register_async_method(CFS_MKDIR, |params, ctx, _| async move {
        file_api::mkdir(params, ctx).await.map_err(ErrorObjectOwned::from)
    })?;
    module.register_async_method(CFS_STAT, |params, ctx, _| async move {
        file_api::stat(params, ctx).await.map_err(ErrorObjectOwned::from)
    })?;
    module.register_async_method(CFS_SYNC, |params, ctx, _| async move {
        file_api::sync(params, ctx).await.map_err(ErrorObjectOwned::from)
    })?;
    module.register_async_method(CFS_DISKS, |params, ctx, _| async move {
        meta_api::disks(params, ctx).await.map_err(ErrorObjectOwned::from)
    })?;
    module.register_async_method(CFS_CONTAINER_INFO, |params, ctx, _| async move {
        stats_api::container_info(params, ctx)
            .await
            .map_err(ErrorObjectOwned::from)
    })?;
    module.register_async_method(CFS_METRICS, |params, ctx, _| async move {
        stats_api::metrics(params, ctx).await.map_err(ErrorObjectOwned::from)
    })?;

    let handle = server.start(module);
    Ok((addr, handle))
}
