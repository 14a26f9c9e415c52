// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! End-to-end round trips through the JSON-RPC server and the typed
//! client, against a node bound to an ephemeral port with a scratch
//! disk root.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use cfs::disk::{Disk, CRC32_LEN, DEFAULT_BLOCK_SIZE};
use cfs::enforce::QuotaGate;
use cfs::rpc::{start_rpc, RPCState};
use cfs::rpc_client::ApiInfo;
use cfs::stats::CounterStore;
use jsonrpsee::server::ServerHandle;
use tempfile::TempDir;

const PSIZE: usize = (DEFAULT_BLOCK_SIZE - CRC32_LEN) as usize;

struct TestNode {
    api: ApiInfo,
    root: PathBuf,
    quota: Arc<QuotaGate>,
    _dir: TempDir,
    _handle: ServerHandle,
}

async fn spawn_node(client_id: i64) -> TestNode {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("cfs0000");
    std::fs::create_dir_all(&root).unwrap();

    let disk = Disk::new("cfs0", &root, DEFAULT_BLOCK_SIZE).unwrap();
    let stats = Arc::new(CounterStore::default());
    let quota = QuotaGate::new(Arc::clone(&stats));
    let state = RPCState {
        disks: HashMap::from([("cfs0".to_string(), disk)]),
        stats,
        quota: Arc::clone(&quota),
    };

    let (addr, handle) = start_rpc(state, "127.0.0.1:0".parse().unwrap())
        .await
        .unwrap();
    let api = ApiInfo::from_address(&addr.to_string(), client_id).unwrap();

    TestNode {
        api,
        root,
        quota,
        _dir: dir,
        _handle: handle,
    }
}

#[tokio::test]
async fn write_read_round_trip() {
    let node = spawn_node(1).await;

    let write = node
        .api
        .write("cfs0/f", 0, b"hello world".to_vec(), false)
        .await
        .unwrap();
    assert_eq!(write.error, None);
    assert_eq!(write.bytes_written, 11);

    let read = node.api.read("cfs0/f", 0, 11, 0).await.unwrap();
    assert_eq!(read.error, None);
    assert_eq!(read.bytes_read, 11);
    assert_eq!(read.data, b"hello world");
    assert_eq!(read.checksum, crc32c::crc32c(b"hello world"));

    // Asking for more than is stored is not an error; the reply is just
    // short.
    let read = node.api.read("cfs0/f", 6, 100, 0).await.unwrap();
    assert_eq!(read.error, None);
    assert_eq!(read.data, b"world");
}

#[tokio::test]
async fn expected_checksum_is_verified() {
    let node = spawn_node(1).await;
    node.api
        .write("cfs0/f", 0, b"payload".to_vec(), false)
        .await
        .unwrap();

    let good = crc32c::crc32c(b"payload");
    let read = node.api.read("cfs0/f", 0, 7, good).await.unwrap();
    assert_eq!(read.error, None);

    let read = node.api.read("cfs0/f", 0, 7, good ^ 1).await.unwrap();
    assert!(read.error.unwrap().contains("checksum mismatch"));
}

#[tokio::test]
async fn writes_past_end_zero_pad() {
    let node = spawn_node(1).await;

    let write = node.api.write("cfs0/f", 10, b"abc".to_vec(), false).await.unwrap();
    assert_eq!(write.error, None);
    assert_eq!(write.bytes_written, 3);

    let read = node.api.read("cfs0/f", 0, 13, 0).await.unwrap();
    assert_eq!(read.error, None);
    assert_eq!(read.bytes_read, 13);
    assert_eq!(&read.data[..10], &[0u8; 10]);
    assert_eq!(&read.data[10..], b"abc");
}

#[tokio::test]
async fn append_writes_at_end_of_data() {
    let node = spawn_node(1).await;

    node.api
        .write("cfs0/f", 0, b"abc".to_vec(), false)
        .await
        .unwrap();
    let write = node.api.write("cfs0/f", 0, b"def".to_vec(), true).await.unwrap();
    assert_eq!(write.error, None);
    assert_eq!(write.bytes_written, 3);

    let read = node.api.read("cfs0/f", 0, 6, 0).await.unwrap();
    assert_eq!(read.data, b"abcdef");
}

#[tokio::test]
async fn corruption_surfaces_to_the_client() {
    let node = spawn_node(1).await;
    node.api
        .write("cfs0/f", 0, vec![9u8; 64], false)
        .await
        .unwrap();

    let path = node.root.join("f");
    let mut raw = std::fs::read(&path).unwrap();
    raw[20] ^= 0x01;
    std::fs::write(&path, &raw).unwrap();

    let read = node.api.read("cfs0/f", 0, 64, 0).await.unwrap();
    assert_eq!(read.bytes_read, 0);
    assert!(read.error.unwrap().contains("CRC"));
}

#[tokio::test]
async fn directory_lifecycle() {
    let node = spawn_node(1).await;

    let mkdir = node.api.mkdir("cfs0/sub/deep", true).await.unwrap();
    assert_eq!(mkdir.error, None);

    node.api
        .write("cfs0/sub/deep/f", 0, b"data".to_vec(), false)
        .await
        .unwrap();

    let readdir = node.api.readdir("cfs0/sub/deep").await.unwrap();
    assert_eq!(readdir.error, None);
    assert_eq!(readdir.file_infos.len(), 1);
    assert_eq!(readdir.file_infos[0].name, "f");
    assert_eq!(readdir.file_infos[0].size, CRC32_LEN + 4);

    let stat = node.api.stat("cfs0/sub/deep/f").await.unwrap();
    assert_eq!(stat.error, None);
    let info = stat.file_info.unwrap();
    assert!(!info.is_dir);
    assert_eq!(info.size, CRC32_LEN + 4);

    let rename = node
        .api
        .rename("cfs0/sub/deep/f", "cfs0/sub/deep/g")
        .await
        .unwrap();
    assert_eq!(rename.error, None);
    assert!(node
        .api
        .stat("cfs0/sub/deep/f")
        .await
        .unwrap()
        .error
        .unwrap()
        .contains("not found"));

    let sync = node
        .api
        .sync(vec!["cfs0/sub/deep/g".to_string()])
        .await
        .unwrap();
    assert_eq!(sync.errors, vec![None]);

    let remove = node.api.remove("cfs0/sub", true).await.unwrap();
    assert_eq!(remove.error, None);
    assert!(node
        .api
        .stat("cfs0/sub")
        .await
        .unwrap()
        .error
        .unwrap()
        .contains("not found"));
}

#[tokio::test]
async fn malformed_names_are_reply_errors() {
    let node = spawn_node(1).await;

    for name in ["cfs0", "", "/", "cfs0/../etc/passwd", "other/f"] {
        let write = node
            .api
            .write(name, 0, b"x".to_vec(), false)
            .await
            .unwrap();
        assert!(
            write.error.unwrap().contains("bad name"),
            "{name:?} should be rejected"
        );
    }

    let write = node.api.write("cfs0/f", -1, b"x".to_vec(), false).await.unwrap();
    assert!(write.error.unwrap().contains("negative offset"));
}

#[tokio::test]
async fn disks_metrics_and_container_info() {
    let node = spawn_node(42).await;
    node.api
        .write("cfs0/f", 0, b"x".to_vec(), false)
        .await
        .unwrap();

    let disks = node.api.disks().await.unwrap();
    let names: Vec<_> = disks.disks.into_iter().map(|d| d.name).collect();
    assert_eq!(names, ["cfs0"]);

    let metrics = node.api.metrics().await.unwrap();
    let get = |name: &str| {
        metrics
            .counters
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value)
    };
    assert_eq!(get("client_42_ops"), Some(1));
    assert_eq!(get("disk_cfs0_write_ops"), Some(1));

    let info = node.api.container_info().await.unwrap();
    assert_eq!(info.error, None);
    let parsed: serde_json::Value = serde_json::from_str(&info.info).unwrap();
    assert_eq!(parsed["disks"][0]["name"], "cfs0");
}

#[tokio::test]
async fn over_quota_requests_get_empty_replies() {
    let node = spawn_node(7).await;
    node.quota.set_quota(7, 0);

    // The window admits exactly quota * interval = 0 further ops beyond
    // the checkpoint, so the first request passes and bumps the counter.
    let first = node.api.write("cfs0/f", 0, b"x".to_vec(), false).await.unwrap();
    assert_eq!(first.error, None);
    assert_eq!(first.bytes_written, 1);

    // Now the live counter is ahead of the checkpoint: refused, as a
    // successful reply with an empty payload.
    let second = node.api.write("cfs0/f", 1, b"y".to_vec(), false).await.unwrap();
    assert_eq!(second.error, None);
    assert_eq!(second.bytes_written, 0);

    let read = node.api.read("cfs0/f", 0, 2, 0).await.unwrap();
    assert_eq!(read.error, None);
    assert_eq!(read.bytes_read, 0);
    assert!(read.data.is_empty());
}

#[tokio::test]
async fn copy_streams_across_block_boundaries() {
    let node = spawn_node(1).await;

    let data: Vec<u8> = (0..PSIZE + PSIZE / 2).map(|i| (i % 251) as u8).collect();
    node.api
        .write("cfs0/src", 0, data.clone(), false)
        .await
        .unwrap();

    let copied = node.api.copy("cfs0/src", "cfs0/dst").await.unwrap();
    assert_eq!(copied, data.len() as u64);

    let read = node
        .api
        .read("cfs0/dst", 0, data.len() as i64, 0)
        .await
        .unwrap();
    assert_eq!(read.error, None);
    assert_eq!(read.data, data);
}
