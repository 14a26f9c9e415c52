// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! `cfs` is a small networked file service. User data is stored as a
//! sequence of fixed-size blocks, each carrying a CRC-32C of its payload,
//! so that every read can detect on-disk corruption. The [`disk`] module
//! holds the block codec and the read/write engines; everything else is
//! plumbing around it: a JSON-RPC server ([`rpc`]), a typed client
//! ([`rpc_client`]), the `cfsctl` command line ([`cli`]) and the `cfsd`
//! daemon ([`daemon`]).

pub mod cli;
pub mod cli_shared;
pub mod daemon;
pub mod disk;
pub mod enforce;
pub mod rpc;
pub mod rpc_client;
pub mod stats;
