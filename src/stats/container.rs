// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::disk::Disk;

/// Best-effort report on the process and the disks it serves, shipped to
/// clients as opaque JSON by the `Cfs.ContainerInfo` call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContainerReport {
    pub hostname: String,
    pub pid: u32,
    pub disks: Vec<DiskUsage>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiskUsage {
    pub name: String,
    pub root: String,
    pub bytes_used: u64,
}

pub fn container_report(disks: &HashMap<String, Disk>) -> ContainerReport {
    let mut usage: Vec<DiskUsage> = disks
        .values()
        .map(|disk| DiskUsage {
            name: disk.name().to_string(),
            root: disk.root().display().to_string(),
            bytes_used: fs_extra::dir::get_size(disk.root()).unwrap_or_default(),
        })
        .collect();
    usage.sort_by(|a, b| a.name.cmp(&b.name));

    ContainerReport {
        hostname: gethostname::gethostname().to_string_lossy().into_owned(),
        pid: std::process::id(),
        disks: usage,
    }
}

#[cfg(test)]
mod tests {
    use crate::disk::DEFAULT_BLOCK_SIZE;

    use super::*;

    #[test]
    fn report_covers_every_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("a")).unwrap();
        std::fs::create_dir_all(dir.path().join("b")).unwrap();
        std::fs::write(dir.path().join("a/f"), b"12345678").unwrap();

        let disks = HashMap::from([
            (
                "a".to_string(),
                Disk::new("a", dir.path().join("a"), DEFAULT_BLOCK_SIZE).unwrap(),
            ),
            (
                "b".to_string(),
                Disk::new("b", dir.path().join("b"), DEFAULT_BLOCK_SIZE).unwrap(),
            ),
        ]);

        let report = container_report(&disks);
        assert_eq!(report.disks.len(), 2);
        assert_eq!(report.disks[0].name, "a");
        assert_eq!(report.disks[0].bytes_used, 8);
        assert_eq!(report.pid, std::process::id());

        // The report must round-trip through JSON for the wire.
        let json = serde_json::to_string(&report).unwrap();
        let back: ContainerReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.disks.len(), 2);
    }
}
