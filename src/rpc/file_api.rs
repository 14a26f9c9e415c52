// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use jsonrpsee::types::Params;
use tokio::task::spawn_blocking;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::error::ServerError;
use super::types::*;
use super::Ctx;
use crate::disk::Disk;

/// Resolve the request's name or produce the reply-level error string.
fn resolve(ctx: &Ctx, name: &str) -> Result<(Disk, String), String> {
    match ctx.resolve_name(name) {
        Ok((disk, rel)) => Ok((disk.clone(), rel)),
        Err(e) => Err(e.to_string()),
    }
}

pub async fn write(params: Params<'_>, ctx: Ctx) -> Result<WriteReply, ServerError> {
    let req: WriteRequest = params.one()?;
    if !ctx.quota.has_quota(req.header.client_id) {
        debug!(client_id = req.header.client_id, "write refused: over quota");
        return Ok(WriteReply::default());
    }
    ctx.stats.counter("ops").client(req.header.client_id).add();

    let (disk, rel) = match resolve(&ctx, &req.name) {
        Ok(v) => v,
        Err(error) => {
            return Ok(WriteReply {
                bytes_written: 0,
                error: Some(error),
            })
        }
    };
    if req.offset < 0 {
        return Ok(WriteReply {
            bytes_written: 0,
            error: Some(format!("negative offset {}", req.offset)),
        });
    }
    ctx.stats.counter("write_ops").disk(disk.name()).add();

    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();
    let offset = req.offset as u64;
    let append = req.append;
    let data = req.data;
    let reply = spawn_blocking(move || {
        let off = if append {
            match disk.data_len(&rel) {
                Ok(len) => len,
                Err(e) => {
                    return WriteReply {
                        bytes_written: 0,
                        error: Some(e.to_string()),
                    }
                }
            }
        } else {
            offset
        };
        match disk.write_at(&rel, &data, off, &cancel) {
            Ok(n) => WriteReply {
                bytes_written: n as i64,
                error: None,
            },
            Err(e) => WriteReply {
                bytes_written: e.n as i64,
                error: Some(e.source.to_string()),
            },
        }
    })
    .await?;
    Ok(reply)
}

pub async fn read(params: Params<'_>, ctx: Ctx) -> Result<ReadReply, ServerError> {
    let req: ReadRequest = params.one()?;
    if !ctx.quota.has_quota(req.header.client_id) {
        debug!(client_id = req.header.client_id, "read refused: over quota");
        return Ok(ReadReply::default());
    }
    ctx.stats.counter("ops").client(req.header.client_id).add();

    let (disk, rel) = match resolve(&ctx, &req.name) {
        Ok(v) => v,
        Err(error) => {
            return Ok(ReadReply {
                error: Some(error),
                ..Default::default()
            })
        }
    };
    if req.offset < 0 || req.length < 0 {
        return Ok(ReadReply {
            error: Some(format!(
                "negative offset or length ({}, {})",
                req.offset, req.length
            )),
            ..Default::default()
        });
    }
    ctx.stats.counter("read_ops").disk(disk.name()).add();

    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();
    let offset = req.offset as u64;
    let length = req.length as usize;
    let mut reply = spawn_blocking(move || {
        let mut buf = vec![0u8; length];
        let (n, error) = match disk.read_at(&rel, &mut buf, offset, &cancel) {
            Ok(out) => (out.n, None),
            Err(e) => (e.n, Some(e.source.to_string())),
        };
        buf.truncate(n);
        let checksum = crc32c::crc32c(&buf);
        ReadReply {
            bytes_read: n as i64,
            data: buf,
            checksum,
            error,
        }
    })
    .await?;

    if req.expected_checksum != 0
        && reply.error.is_none()
        && reply.checksum != req.expected_checksum
    {
        reply.error = Some(format!(
            "checksum mismatch: expected {:#010x}, got {:#010x}",
            req.expected_checksum, reply.checksum
        ));
    }
    Ok(reply)
}

pub async fn rename(params: Params<'_>, ctx: Ctx) -> Result<RenameReply, ServerError> {
    let req: RenameRequest = params.one()?;
    if !ctx.quota.has_quota(req.header.client_id) {
        return Ok(RenameReply::default());
    }
    ctx.stats.counter("ops").client(req.header.client_id).add();

    let (old_disk, old_rel) = match resolve(&ctx, &req.oldname) {
        Ok(v) => v,
        Err(error) => return Ok(RenameReply { error: Some(error) }),
    };
    let (new_disk, new_rel) = match resolve(&ctx, &req.newname) {
        Ok(v) => v,
        Err(error) => return Ok(RenameReply { error: Some(error) }),
    };
    if old_disk.name() != new_disk.name() {
        return Ok(RenameReply {
            error: Some(format!(
                "cannot rename across disks (`{}` to `{}`)",
                old_disk.name(),
                new_disk.name()
            )),
        });
    }
    ctx.stats.counter("rename_ops").disk(old_disk.name()).add();

    let reply = spawn_blocking(move || RenameReply {
        error: old_disk.rename(&old_rel, &new_rel).err().map(|e| e.to_string()),
    })
    .await?;
    Ok(reply)
}

pub async fn remove(params: Params<'_>, ctx: Ctx) -> Result<RemoveReply, ServerError> {
    let req: RemoveRequest = params.one()?;
    if !ctx.quota.has_quota(req.header.client_id) {
        return Ok(RemoveReply::default());
    }
    ctx.stats.counter("ops").client(req.header.client_id).add();

    let (disk, rel) = match resolve(&ctx, &req.name) {
        Ok(v) => v,
        Err(error) => return Ok(RemoveReply { error: Some(error) }),
    };
    ctx.stats.counter("remove_ops").disk(disk.name()).add();

    let all = req.all;
    let reply = spawn_blocking(move || RemoveReply {
        error: disk.remove(&rel, all).err().map(|e| e.to_string()),
    })
    .await?;
    Ok(reply)
}

pub async fn readdir(params: Params<'_>, ctx: Ctx) -> Result<ReadDirReply, ServerError> {
    let req: ReadDirRequest = params.one()?;
    if !ctx.quota.has_quota(req.header.client_id) {
        return Ok(ReadDirReply::default());
    }
    ctx.stats.counter("ops").client(req.header.client_id).add();

    let (disk, rel) = match resolve(&ctx, &req.name) {
        Ok(v) => v,
        Err(error) => {
            return Ok(ReadDirReply {
                error: Some(error),
                ..Default::default()
            })
        }
    };
    ctx.stats.counter("readdir_ops").disk(disk.name()).add();

    let reply = spawn_blocking(move || match disk.readdir(&rel) {
        Ok(file_infos) => ReadDirReply {
            file_infos,
            error: None,
        },
        Err(e) => ReadDirReply {
            file_infos: Vec::new(),
            error: Some(e.to_string()),
        },
    })
    .await?;
    Ok(reply)
}

pub async fn mkdir(params: Params<'_>, ctx: Ctx) -> Result<MkdirReply, ServerError> {
    let req: MkdirRequest = params.one()?;
    if !ctx.quota.has_quota(req.header.client_id) {
        return Ok(MkdirReply::default());
    }
    ctx.stats.counter("ops").client(req.header.client_id).add();

    let (disk, rel) = match resolve(&ctx, &req.name) {
        Ok(v) => v,
        Err(error) => return Ok(MkdirReply { error: Some(error) }),
    };
    ctx.stats.counter("mkdir_ops").disk(disk.name()).add();

    let all = req.all;
    let reply = spawn_blocking(move || MkdirReply {
        error: disk.mkdir(&rel, all).err().map(|e| e.to_string()),
    })
    .await?;
    Ok(reply)
}

pub async fn stat(params: Params<'_>, ctx: Ctx) -> Result<StatReply, ServerError> {
    let req: StatRequest = params.one()?;
    if !ctx.quota.has_quota(req.header.client_id) {
        return Ok(StatReply::default());
    }
    ctx.stats.counter("ops").client(req.header.client_id).add();

    let (disk, rel) = match resolve(&ctx, &req.name) {
        Ok(v) => v,
        Err(error) => {
            return Ok(StatReply {
                file_info: None,
                error: Some(error),
            })
        }
    };
    ctx.stats.counter("stat_ops").disk(disk.name()).add();

    let reply = spawn_blocking(move || match disk.stat(&rel) {
        Ok(file_info) => StatReply {
            file_info: Some(file_info),
            error: None,
        },
        Err(e) => StatReply {
            file_info: None,
            error: Some(e.to_string()),
        },
    })
    .await?;
    Ok(reply)
}

pub async fn sync(params: Params<'_>, ctx: Ctx) -> Result<SyncReply, ServerError> {
    let req: SyncRequest = params.one()?;
    if !ctx.quota.has_quota(req.header.client_id) {
        return Ok(SyncReply::default());
    }
    ctx.stats.counter("ops").client(req.header.client_id).add();

    let resolved: Vec<Result<(Disk, String), String>> =
        req.names.iter().map(|name| resolve(&ctx, name)).collect();
    for target in &resolved {
        if let Ok((disk, _)) = target {
            ctx.stats.counter("sync_ops").disk(disk.name()).add();
        }
    }

    let reply = spawn_blocking(move || {
        let errors = resolved
            .into_iter()
            .map(|target| match target {
                Ok((disk, rel)) => disk.sync(&rel).err().map(|e| e.to_string()),
                Err(error) => Some(error),
            })
            .collect();
        SyncReply { errors }
    })
    .await?;
    Ok(reply)
}
