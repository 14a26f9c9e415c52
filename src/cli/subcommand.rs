// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::Subcommand;
use crate::rpc_client::ApiInfo;

/// Process CLI sub-command.
pub(super) async fn process(cmd: Subcommand, api: &ApiInfo) -> anyhow::Result<()> {
    match cmd {
        Subcommand::Read(cmd) => cmd.run(api).await,
        Subcommand::Write(cmd) => cmd.run(api).await,
        Subcommand::Rename(cmd) => cmd.run(api).await,
        Subcommand::Remove(cmd) => cmd.run(api).await,
        Subcommand::ReadDir(cmd) => cmd.run(api).await,
        Subcommand::Mkdir(cmd) => cmd.run(api).await,
        Subcommand::Stat(cmd) => cmd.run(api).await,
        Subcommand::Disks(cmd) => cmd.run(api).await,
        Subcommand::Copy(cmd) => cmd.run(api).await,
        Subcommand::Sync(cmd) => cmd.run(api).await,
        Subcommand::Stats(cmd) => cmd.run(api).await,
    }
}
