// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! The disk core: a byte-addressed view over files stored as fixed-size,
//! checksum-protected blocks.
//!
//! Every user-visible offset is translated into a block index and an
//! intra-block offset. Reads verify the checksum of each block they
//! touch; writes that do not fall on block boundaries read-modify-write
//! the affected partial blocks so neighbouring payload bytes survive and
//! the stored checksum stays valid; writes past the current end of data
//! first materialise the gap as zero payload.

mod block;
mod errors;
mod name;

pub use block::{
    data_len, payload_position, read_block, write_block, Block, CRC32_LEN, DEFAULT_BLOCK_SIZE,
};
pub use errors::{Error, TransferError};
pub use name::split_disk_path;

use std::borrow::Cow;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Outcome of a successful read: bytes copied into the caller's buffer,
/// and whether the file ran out of payload before the buffer was filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOutcome {
    pub n: usize,
    pub eof: bool,
}

/// Directory entry metadata. `size` is the PHYSICAL file size; callers
/// that want the logical payload length convert it with [`data_len`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    pub is_dir: bool,
}

/// A named root directory holding block-encoded files.
///
/// The facade owns configuration only; every operation opens and closes
/// its own file handle.
#[derive(Debug, Clone)]
pub struct Disk {
    name: String,
    root: PathBuf,
    bsize: u64,
}

impl Disk {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>, bsize: u64) -> Result<Self, Error> {
        if bsize <= CRC32_LEN {
            return Err(Error::BadPayloadSize);
        }
        Ok(Self {
            name: name.into(),
            root: root.into(),
            bsize,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn block_size(&self) -> u64 {
        self.bsize
    }

    fn psize(&self) -> usize {
        (self.bsize - CRC32_LEN) as usize
    }

    fn resolve(&self, rel: &Path) -> PathBuf {
        self.root.join(rel)
    }

    /// Fill `buf` with payload bytes starting at logical offset `off`.
    ///
    /// Bytes `buf[..n]` of the outcome equal the file's payload at
    /// `[off..off + n)`. `eof` is set when the file holds fewer than
    /// `off + buf.len()` payload bytes, in which case `n` is exactly the
    /// count available from `off`. A checksum failure reports the number
    /// of valid bytes copied before the offending block.
    pub fn read_at(
        &self,
        rel: impl AsRef<Path>,
        buf: &mut [u8],
        off: u64,
        cancel: &CancellationToken,
    ) -> Result<ReadOutcome, TransferError> {
        if buf.is_empty() {
            return Ok(ReadOutcome { n: 0, eof: false });
        }

        let path = self.resolve(rel.as_ref());
        let mut f = File::open(&path).map_err(|e| not_found(e, &path))?;

        let psize = self.psize();
        let (mut index, p) = payload_position(off, psize as u64);
        let mut intra = p as usize;
        let mut copied = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(TransferError::new(copied, Error::Cancelled));
            }

            let mut b = Block::new(psize);
            match read_block(&mut f, &mut b, index, self.bsize) {
                Ok(()) => {}
                Err(Error::UnexpectedEof) => return Ok(ReadOutcome { n: copied, eof: true }),
                Err(e) => return Err(TransferError::new(copied, e)),
            }
            // The intra-block offset applies to the first block only.
            b.start_from(intra);
            intra = 0;

            let k = (buf.len() - copied).min(b.len());
            buf[copied..copied + k].copy_from_slice(&b.payload()[..k]);
            copied += k;

            if copied == buf.len() {
                return Ok(ReadOutcome { n: copied, eof: false });
            }
            if b.is_short() {
                return Ok(ReadOutcome { n: copied, eof: true });
            }
            index += 1;
        }
    }

    /// Write `data` at logical offset `off`, creating the file if needed.
    ///
    /// When `off` lies past the current end of data, the gap is filled
    /// with zero bytes that become permanent, checksummed payload; the
    /// returned count covers `data` only, never the padding. Blocks go
    /// out in strictly ascending index order and a mid-stream failure
    /// reports how many of `data`'s bytes were durably written.
    pub fn write_at(
        &self,
        rel: impl AsRef<Path>,
        data: &[u8],
        off: u64,
        cancel: &CancellationToken,
    ) -> Result<usize, TransferError> {
        if data.is_empty() {
            return Ok(0);
        }

        let path = self.resolve(rel.as_ref());
        let mut opts = OpenOptions::new();
        opts.read(true).write(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(0o600);
        }
        let mut f = opts.open(&path).map_err(TransferError::from)?;

        let psize = self.psize();
        let flen = f.metadata().map_err(TransferError::from)?.len();
        let dlen = data_len(flen, self.bsize);

        // Writing past the end turns into a write at the end whose payload
        // is prefixed with the zero gap.
        let (st, pad) = if off <= dlen {
            (off, 0)
        } else {
            (dlen, (off - dlen) as usize)
        };
        let payload: Cow<'_, [u8]> = if pad == 0 {
            Cow::Borrowed(data)
        } else {
            let mut v = vec![0u8; pad + data.len()];
            v[pad..].copy_from_slice(data);
            Cow::Owned(v)
        };

        let end = st + payload.len() as u64;
        let (mut index, p) = payload_position(st, psize as u64);
        let (i_end, q) = payload_position(end, psize as u64);
        let p_st = p as usize;
        let p_end = q as usize;

        // Padding bytes come first in `payload` and are not reported.
        let written = |n: usize| n.saturating_sub(pad);

        let mut rest: &[u8] = &payload;
        let mut n = 0;

        // Fast path: the whole write lands in one block.
        if index == i_end {
            let mut b = Block::new(psize);
            match read_block(&mut f, &mut b, index, self.bsize) {
                Ok(()) => {}
                Err(Error::UnexpectedEof) => b.end_at(p_st),
                Err(e) => return Err(TransferError::new(0, e)),
            }
            b.fill(p_st, rest);
            write_block(&mut f, &b, index, self.bsize).map_err(|e| TransferError::new(0, e))?;
            return Ok(written(payload.len()));
        }

        // Head partial block: merge with the bytes already on disk so
        // everything before `p_st` survives.
        if p_st > 0 {
            let mut b = Block::new(psize);
            match read_block(&mut f, &mut b, index, self.bsize) {
                Ok(()) => {}
                Err(Error::UnexpectedEof) => b.end_at(p_st),
                Err(e) => return Err(TransferError::new(written(n), e)),
            }
            let take = psize - p_st;
            b.fill(p_st, &rest[..take]);
            write_block(&mut f, &b, index, self.bsize)
                .map_err(|e| TransferError::new(written(n), e))?;
            rest = &rest[take..];
            n += take;
            index += 1;
        }

        // Full middle blocks replace their contents wholesale, so the
        // read phase is skipped entirely.
        while index < i_end {
            if cancel.is_cancelled() {
                return Err(TransferError::new(written(n), Error::Cancelled));
            }
            let mut b = Block::new(psize);
            b.fill(0, &rest[..psize]);
            write_block(&mut f, &b, index, self.bsize)
                .map_err(|e| TransferError::new(written(n), e))?;
            rest = &rest[psize..];
            n += psize;
            index += 1;
        }

        // Tail partial block.
        if p_end > 0 {
            let mut b = Block::new(psize);
            match read_block(&mut f, &mut b, i_end, self.bsize) {
                Ok(()) | Err(Error::UnexpectedEof) => {}
                Err(e) => return Err(TransferError::new(written(n), e)),
            }
            b.fill(0, rest);
            write_block(&mut f, &b, i_end, self.bsize)
                .map_err(|e| TransferError::new(written(n), e))?;
            n += p_end;
        }

        Ok(written(n))
    }

    /// Logical payload length of a file; a missing file has length zero.
    pub fn data_len(&self, rel: impl AsRef<Path>) -> Result<u64, Error> {
        let path = self.resolve(rel.as_ref());
        match fs::metadata(&path) {
            Ok(md) => Ok(data_len(md.len(), self.bsize)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    pub fn rename(&self, old: impl AsRef<Path>, new: impl AsRef<Path>) -> Result<(), Error> {
        let old = self.resolve(old.as_ref());
        let new = self.resolve(new.as_ref());
        fs::rename(&old, &new).map_err(|e| not_found(e, &old))
    }

    /// Remove a file or directory; `all` removes a directory and its
    /// contents recursively.
    pub fn remove(&self, rel: impl AsRef<Path>, all: bool) -> Result<(), Error> {
        let path = self.resolve(rel.as_ref());
        let md = fs::symlink_metadata(&path).map_err(|e| not_found(e, &path))?;
        if md.is_dir() {
            if all {
                fs::remove_dir_all(&path).map_err(Error::from)
            } else {
                fs::remove_dir(&path).map_err(Error::from)
            }
        } else {
            fs::remove_file(&path).map_err(Error::from)
        }
    }

    pub fn readdir(&self, rel: impl AsRef<Path>) -> Result<Vec<FileInfo>, Error> {
        let path = self.resolve(rel.as_ref());
        let mut infos = Vec::new();
        for entry in fs::read_dir(&path).map_err(|e| not_found(e, &path))? {
            let entry = entry?;
            let md = entry.metadata()?;
            infos.push(FileInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: md.len(),
                is_dir: md.is_dir(),
            });
        }
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }

    pub fn mkdir(&self, rel: impl AsRef<Path>, all: bool) -> Result<(), Error> {
        let path = self.resolve(rel.as_ref());
        let mut builder = fs::DirBuilder::new();
        builder.recursive(all);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(&path).map_err(Error::from)
    }

    pub fn stat(&self, rel: impl AsRef<Path>) -> Result<FileInfo, Error> {
        let rel = rel.as_ref();
        let path = self.resolve(rel);
        let md = fs::metadata(&path).map_err(|e| not_found(e, &path))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| rel.to_string_lossy().into_owned());
        Ok(FileInfo {
            name,
            size: md.len(),
            is_dir: md.is_dir(),
        })
    }

    /// Flush a file's blocks to stable storage.
    pub fn sync(&self, rel: impl AsRef<Path>) -> Result<(), Error> {
        let path = self.resolve(rel.as_ref());
        let f = File::open(&path).map_err(|e| not_found(e, &path))?;
        f.sync_all().map_err(Error::from)
    }
}

fn not_found(e: io::Error, path: &Path) -> Error {
    if e.kind() == io::ErrorKind::NotFound {
        Error::NotFound(path.to_path_buf())
    } else {
        Error::Io(e)
    }
}
