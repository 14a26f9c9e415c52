// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::io::{self, Write as _};

use crate::cli::check_reply_err;
use crate::rpc_client::ApiInfo;

#[derive(Debug, clap::Args)]
pub struct ReadCommand {
    /// Logical name `<disk>/<path>` to read
    #[arg(short, long)]
    name: String,
    /// Read offset
    #[arg(short, long, default_value_t = 0)]
    offset: i64,
    /// Read length
    #[arg(short, long)]
    length: i64,
    /// Expected CRC-32C of the returned bytes; 0 disables the check
    #[arg(long, default_value_t = 0)]
    expected_checksum: u32,
}

impl ReadCommand {
    pub async fn run(&self, api: &ApiInfo) -> anyhow::Result<()> {
        let reply = api
            .read(&self.name, self.offset, self.length, self.expected_checksum)
            .await?;
        check_reply_err("read", reply.error)?;
        io::stdout().write_all(&reply.data)?;
        Ok(())
    }
}
