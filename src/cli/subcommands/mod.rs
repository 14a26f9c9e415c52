// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod copy_cmd;
mod disks_cmd;
mod mkdir_cmd;
mod read_cmd;
mod readdir_cmd;
mod remove_cmd;
mod rename_cmd;
mod stat_cmd;
mod stats_cmd;
mod sync_cmd;
mod write_cmd;

pub(super) use self::copy_cmd::CopyCommand;
pub(super) use self::disks_cmd::DisksCommand;
pub(super) use self::mkdir_cmd::MkdirCommand;
pub(super) use self::read_cmd::ReadCommand;
pub(super) use self::readdir_cmd::ReadDirCommand;
pub(super) use self::remove_cmd::RemoveCommand;
pub(super) use self::rename_cmd::RenameCommand;
pub(super) use self::stat_cmd::StatCommand;
pub(super) use self::stats_cmd::StatsCommand;
pub(super) use self::sync_cmd::SyncCommand;
pub(super) use self::write_cmd::WriteCommand;
