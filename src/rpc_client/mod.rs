// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Typed client for the daemon's JSON-RPC surface. One async op per
//! method; replies are returned as-is so callers can inspect the
//! reply-level `error` field themselves.

use anyhow::{bail, Context as _};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;

use crate::rpc::types::*;
use crate::rpc::{
    CFS_CONTAINER_INFO, CFS_DISKS, CFS_METRICS, CFS_MKDIR, CFS_READ, CFS_READDIR, CFS_REMOVE,
    CFS_RENAME, CFS_STAT, CFS_SYNC, CFS_WRITE,
};

/// Chunk size used by [`ApiInfo::copy`].
const COPY_CHUNK: i64 = 1 << 20;

pub struct ApiInfo {
    client: HttpClient,
    header: RequestHeader,
}

impl ApiInfo {
    /// Connect to a node at `host:port` (a full `http://` URL is also
    /// accepted).
    pub fn from_address(address: &str, client_id: i64) -> anyhow::Result<Self> {
        let url = if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else {
            format!("http://{address}")
        };
        let client = HttpClientBuilder::default()
            .build(&url)
            .with_context(|| format!("cannot connect to `{url}`"))?;
        Ok(Self {
            client,
            header: RequestHeader { client_id },
        })
    }

    pub async fn write(
        &self,
        name: &str,
        offset: i64,
        data: Vec<u8>,
        append: bool,
    ) -> anyhow::Result<WriteReply> {
        let req = WriteRequest {
            header: self.header,
            name: name.to_string(),
            offset,
            data,
            append,
        };
        Ok(self.client.request(CFS_WRITE, rpc_params![req]).await?)
    }

    pub async fn read(
        &self,
        name: &str,
        offset: i64,
        length: i64,
        expected_checksum: u32,
    ) -> anyhow::Result<ReadReply> {
        let req = ReadRequest {
            header: self.header,
            name: name.to_string(),
            offset,
            length,
            expected_checksum,
        };
        Ok(self.client.request(CFS_READ, rpc_params![req]).await?)
    }

    pub async fn rename(&self, oldname: &str, newname: &str) -> anyhow::Result<RenameReply> {
        let req = RenameRequest {
            header: self.header,
            oldname: oldname.to_string(),
            newname: newname.to_string(),
        };
        Ok(self.client.request(CFS_RENAME, rpc_params![req]).await?)
    }

    pub async fn remove(&self, name: &str, all: bool) -> anyhow::Result<RemoveReply> {
        let req = RemoveRequest {
            header: self.header,
            name: name.to_string(),
            all,
        };
        Ok(self.client.request(CFS_REMOVE, rpc_params![req]).await?)
    }

    pub async fn readdir(&self, name: &str) -> anyhow::Result<ReadDirReply> {
        let req = ReadDirRequest {
            header: self.header,
            name: name.to_string(),
        };
        Ok(self.client.request(CFS_READDIR, rpc_params![req]).await?)
    }

    pub async fn mkdir(&self, name: &str, all: bool) -> anyhow::Result<MkdirReply> {
        let req = MkdirRequest {
            header: self.header,
            name: name.to_string(),
            all,
        };
        Ok(self.client.request(CFS_MKDIR, rpc_params![req]).await?)
    }

    pub async fn stat(&self, name: &str) -> anyhow::Result<StatReply> {
        let req = StatRequest {
            header: self.header,
            name: name.to_string(),
        };
        Ok(self.client.request(CFS_STAT, rpc_params![req]).await?)
    }

    pub async fn sync(&self, names: Vec<String>) -> anyhow::Result<SyncReply> {
        let req = SyncRequest {
            header: self.header,
            names,
        };
        Ok(self.client.request(CFS_SYNC, rpc_params![req]).await?)
    }

    pub async fn disks(&self) -> anyhow::Result<DisksReply> {
        Ok(self.client.request(CFS_DISKS, rpc_params![]).await?)
    }

    pub async fn container_info(&self) -> anyhow::Result<ContainerInfoReply> {
        Ok(self
            .client
            .request(CFS_CONTAINER_INFO, rpc_params![])
            .await?)
    }

    pub async fn metrics(&self) -> anyhow::Result<MetricsReply> {
        Ok(self.client.request(CFS_METRICS, rpc_params![]).await?)
    }

    /// Server-to-server copy driven from the client: read `src` in
    /// chunks and write them to `dst` until the source runs dry.
    /// Returns the number of bytes copied.
    pub async fn copy(&self, src: &str, dst: &str) -> anyhow::Result<u64> {
        let mut offset: i64 = 0;
        loop {
            let read = self.read(src, offset, COPY_CHUNK, 0).await?;
            if let Some(err) = read.error {
                bail!("read `{src}` at offset {offset}: {err}");
            }
            if read.bytes_read > 0 {
                let write = self.write(dst, offset, read.data, false).await?;
                if let Some(err) = write.error {
                    bail!("write `{dst}` at offset {offset}: {err}");
                }
                if write.bytes_written != read.bytes_read {
                    bail!(
                        "short write to `{dst}`: {} of {} bytes",
                        write.bytes_written,
                        read.bytes_read
                    );
                }
                offset += read.bytes_read;
            }
            if read.bytes_read < COPY_CHUNK {
                return Ok(offset as u64);
            }
        }
    }
}
