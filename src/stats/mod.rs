// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Process-wide operation counters. Counters are plain atomics behind a
//! name map; RPC handlers bump them on every operation, the quota gate
//! reads the per-client totals, and the daemon serves the whole set as
//! Prometheus text on `/metrics`.

mod container;

pub use container::{container_report, ContainerReport, DiskUsage};

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// One counter of a metrics snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: u64,
}

#[derive(Default)]
pub struct CounterStore {
    counters: RwLock<HashMap<String, Arc<AtomicU64>>>,
}

impl CounterStore {
    /// Start building a counter name; finish with [`Counter::add`].
    pub fn counter<'a>(&'a self, name: &'a str) -> Counter<'a> {
        Counter {
            store: self,
            name,
            disk: None,
            client: None,
        }
    }

    pub fn inc(&self, name: &str) {
        if let Some(counter) = self.counters.read().get(name) {
            counter.fetch_add(1, Ordering::Relaxed);
            return;
        }
        self.counters
            .write()
            .entry(name.to_string())
            .or_default()
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self, name: &str) -> u64 {
        self.counters
            .read()
            .get(name)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// All counters, sorted by name.
    pub fn snapshot(&self) -> Vec<Metric> {
        let mut metrics: Vec<Metric> = self
            .counters
            .read()
            .iter()
            .map(|(name, value)| Metric {
                name: name.clone(),
                value: value.load(Ordering::Relaxed),
            })
            .collect();
        metrics.sort_by(|a, b| a.name.cmp(&b.name));
        metrics
    }
}

/// Builder assembling a counter name from an operation, an optional disk
/// and an optional client.
pub struct Counter<'a> {
    store: &'a CounterStore,
    name: &'a str,
    disk: Option<&'a str>,
    client: Option<i64>,
}

impl<'a> Counter<'a> {
    pub fn disk(mut self, disk: &'a str) -> Self {
        self.disk = Some(disk);
        self
    }

    pub fn client(mut self, client: i64) -> Self {
        self.client = Some(client);
        self
    }

    pub fn add(self) {
        let mut full = String::new();
        if let Some(disk) = self.disk {
            let _ = write!(full, "disk_{disk}_");
        }
        if let Some(client) = self.client {
            let _ = write!(full, "client_{client}_");
        }
        full.push_str(self.name);
        self.store.inc(&full);
    }
}

/// Name of the counter tracking a client's total operations.
pub fn client_ops_name(client_id: i64) -> String {
    format!("client_{client_id}_ops")
}

/// Inverse of [`client_ops_name`].
pub fn parse_client_ops_name(name: &str) -> Option<i64> {
    name.strip_prefix("client_")?
        .strip_suffix("_ops")?
        .parse()
        .ok()
}

/// Serve the counter store as Prometheus text on `/metrics`.
pub async fn init_metrics_endpoint(
    listener: tokio::net::TcpListener,
    stats: Arc<CounterStore>,
) -> anyhow::Result<()> {
    let app = Router::new()
        .route("/metrics", get(collect_metrics))
        .with_state(stats);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn collect_metrics(State(stats): State<Arc<CounterStore>>) -> String {
    let mut out = String::new();
    for metric in stats.snapshot() {
        let _ = writeln!(out, "# TYPE cfs_{} counter", metric.name);
        let _ = writeln!(out, "cfs_{} {}", metric.name, metric.value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_names_compose() {
        let store = CounterStore::default();
        store.counter("write_ops").disk("cfs0").add();
        store.counter("ops").client(42).add();
        store.counter("ops").client(42).add();

        assert_eq!(store.get("disk_cfs0_write_ops"), 1);
        assert_eq!(store.get("client_42_ops"), 2);
        assert_eq!(store.get("missing"), 0);
    }

    #[test]
    fn snapshot_is_sorted() {
        let store = CounterStore::default();
        store.inc("b");
        store.inc("a");
        store.inc("c");
        let names: Vec<_> = store.snapshot().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn client_ops_name_round_trips() {
        assert_eq!(parse_client_ops_name(&client_ops_name(42)), Some(42));
        assert_eq!(parse_client_ops_name(&client_ops_name(-3)), Some(-3));
        assert_eq!(parse_client_ops_name("disk_cfs0_write_ops"), None);
        assert_eq!(parse_client_ops_name("client_x_ops"), None);
        assert_eq!(parse_client_ops_name("client_1_reads"), None);
    }
}
