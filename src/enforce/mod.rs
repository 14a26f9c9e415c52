// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Per-client rate limiting. The gate compares a client's live operation
//! counter against a checkpoint refreshed every [`FLUSH_INTERVAL`]; a
//! client stays within quota while it performs at most
//! `quota * FLUSH_INTERVAL` operations per window. Counter reads are not
//! synchronised with the checkpoint task, which is why the window is
//! seconds wide rather than instantaneous.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::stats::{client_ops_name, parse_client_ops_name, CounterStore};

/// How often the per-client checkpoints are refreshed from the live
/// counter store.
pub const FLUSH_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Default)]
struct Inner {
    /// Per-client operation counts at the last checkpoint.
    ops: HashMap<i64, u64>,
    /// Per-client ops-per-second limits.
    quotas: HashMap<i64, u64>,
}

pub struct QuotaGate {
    counters: Arc<CounterStore>,
    inner: Mutex<Inner>,
}

impl QuotaGate {
    pub fn new(counters: Arc<CounterStore>) -> Arc<Self> {
        let gate = Arc::new(Self {
            counters,
            inner: Mutex::new(Inner::default()),
        });
        gate.checkpoint();
        gate
    }

    /// Refresh the checkpoints forever; run as a background task.
    pub async fn refresh_loop(self: Arc<Self>) {
        let mut tick = tokio::time::interval(FLUSH_INTERVAL);
        tick.tick().await;
        loop {
            tick.tick().await;
            self.checkpoint();
        }
    }

    /// Copy every client's live operation count into the checkpoint map.
    pub fn checkpoint(&self) {
        let mut inner = self.inner.lock();
        for metric in self.counters.snapshot() {
            if let Some(id) = parse_client_ops_name(&metric.name) {
                inner.ops.insert(id, metric.value);
            }
        }
    }

    /// Whether `client_id` may perform another operation. Clients without
    /// a configured quota are never limited.
    pub fn has_quota(&self, client_id: i64) -> bool {
        let (quota, checkpoint) = {
            let inner = self.inner.lock();
            match inner.quotas.get(&client_id) {
                None => return true,
                Some(&q) => (q, inner.ops.get(&client_id).copied().unwrap_or(0)),
            }
        };
        let live = self.counters.get(&client_ops_name(client_id));
        live.saturating_sub(checkpoint) <= quota * FLUSH_INTERVAL.as_secs()
    }

    /// Install or overwrite a client's ops-per-second limit.
    pub fn set_quota(&self, client_id: i64, quota: u64) {
        self.inner.lock().quotas.insert(client_id, quota);
    }
}
