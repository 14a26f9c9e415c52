// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::cli::check_reply_err;
use crate::rpc_client::ApiInfo;

#[derive(Debug, clap::Args)]
pub struct WriteCommand {
    /// Logical name `<disk>/<path>` to write
    #[arg(short, long)]
    name: String,
    /// Write offset; ignored with `--append`
    #[arg(short, long, default_value_t = 0)]
    offset: i64,
    /// Data to write
    #[arg(short, long)]
    data: String,
    /// Write at the current end of data instead of `--offset`
    #[arg(long)]
    append: bool,
}

impl WriteCommand {
    pub async fn run(&self, api: &ApiInfo) -> anyhow::Result<()> {
        let reply = api
            .write(
                &self.name,
                self.offset,
                self.data.clone().into_bytes(),
                self.append,
            )
            .await?;
        check_reply_err("write", reply.error)?;
        println!(
            "{} bytes written to {} at offset {}",
            reply.bytes_written, self.name, self.offset
        );
        Ok(())
    }
}
