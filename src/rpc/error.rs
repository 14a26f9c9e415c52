// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;

use jsonrpsee::types::error::{ErrorObjectOwned, INTERNAL_ERROR_CODE, INVALID_PARAMS_CODE};

/// Transport-level RPC failure: malformed parameters or an internal
/// fault. Disk-core errors never take this path; they travel inside the
/// reply's `error` field so the wire contract stays intact.
#[derive(Debug)]
pub struct ServerError {
    inner: ErrorObjectOwned,
}

impl ServerError {
    pub fn new(code: i32, message: impl fmt::Display) -> Self {
        Self {
            inner: ErrorObjectOwned::owned(code, message.to_string(), None::<()>),
        }
    }

    pub fn internal_error(message: impl fmt::Display) -> Self {
        Self::new(INTERNAL_ERROR_CODE, message)
    }

    pub fn invalid_params(message: impl fmt::Display) -> Self {
        Self::new(INVALID_PARAMS_CODE, message)
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JSON-RPC error: {}", self.inner.message())
    }
}

impl std::error::Error for ServerError {}

impl From<ErrorObjectOwned> for ServerError {
    fn from(inner: ErrorObjectOwned) -> Self {
        Self { inner }
    }
}

impl From<ServerError> for ErrorObjectOwned {
    fn from(e: ServerError) -> Self {
        e.inner
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::internal_error(e)
    }
}
