// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::disk::DEFAULT_BLOCK_SIZE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the JSON-RPC server binds to.
    pub bind: String,
    pub port: u16,
    /// Address of the plain-text `/metrics` endpoint.
    pub metrics_address: SocketAddr,
    pub disks: Vec<DiskConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quotas: Vec<QuotaConfig>,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 15524,
            metrics_address: SocketAddr::from((Ipv4Addr::LOCALHOST, 6116)),
            disks: vec![DiskConfig::default()],
            quotas: Vec::new(),
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskConfig {
    pub name: String,
    pub root: PathBuf,
    pub block_size: u64,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            name: "cfs0".to_string(),
            root: "./cfs0000".into(),
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaConfig {
    pub client_id: i64,
    pub ops_per_second: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub filters: Vec<LogValue>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filters: vec![
                LogValue::new("jsonrpsee_server", "warn"),
                LogValue::new("hyper", "warn"),
                LogValue::new("tower", "warn"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogValue {
    pub module: String,
    pub level: String,
}

impl LogValue {
    pub fn new(module: &str, level: &str) -> Self {
        Self {
            module: module.to_string(),
            level: level.to_string(),
        }
    }
}

/// Load the daemon configuration, falling back to the defaults when no
/// path is given.
pub fn read_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config at `{}`", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("failed to parse config at `{}`", path.display()))
        }
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_documents_fill_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            port = 15525

            [[disks]]
            name = "cfs0"
            root = "/srv/cfs0"

            [[disks]]
            name = "cfs1"
            root = "/srv/cfs1"
            block_size = 8192

            [[quotas]]
            client_id = 7
            ops_per_second = 100
            "#,
        )
        .unwrap();

        assert_eq!(config.bind, "127.0.0.1");
        assert_eq!(config.port, 15525);
        assert_eq!(config.disks.len(), 2);
        assert_eq!(config.disks[0].block_size, DEFAULT_BLOCK_SIZE);
        assert_eq!(config.disks[1].block_size, 8192);
        assert_eq!(config.quotas[0].client_id, 7);
        assert!(!config.log.filters.is_empty());
    }
}
