// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the disk core.
#[derive(Debug, Error)]
pub enum Error {
    /// A block's stored CRC-32C does not match its payload.
    #[error("disk: not a valid CRC")]
    BadChecksum,
    /// The block size handed to the codec cannot hold a checksum header,
    /// or disagrees with the payload buffer it was given.
    #[error("disk: bad payload size")]
    BadPayloadSize,
    /// A logical name did not resolve to `<disk>/<relative/path>`.
    #[error("disk: bad name `{0}`")]
    BadName(String),
    /// The backing file or directory does not exist.
    #[error("disk: `{0}` not found")]
    NotFound(PathBuf),
    /// Internal codec signal: the requested block lies past the end of the
    /// file. The read engine converts it to end-of-data, the write engine
    /// treats it as "block does not exist yet". Never surfaced to callers.
    #[error("disk: unexpected end of file")]
    UnexpectedEof,
    /// The operation was cancelled between blocks.
    #[error("disk: operation cancelled")]
    Cancelled,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A read or write that stopped part-way through. `n` counts the payload
/// bytes successfully transferred before the failure; the file may be
/// partially extended but every block it contains has a valid checksum.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct TransferError {
    pub n: usize,
    #[source]
    pub source: Error,
}

impl TransferError {
    pub fn new(n: usize, source: Error) -> Self {
        Self { n, source }
    }
}

impl From<Error> for TransferError {
    fn from(source: Error) -> Self {
        Self { n: 0, source }
    }
}

impl From<io::Error> for TransferError {
    fn from(err: io::Error) -> Self {
        Error::from(err).into()
    }
}
