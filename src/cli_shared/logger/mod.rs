// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use tracing_subscriber::filter::{Directive, EnvFilter};

use crate::cli_shared::cli::LogConfig;

/// Install the global tracing subscriber. `RUST_LOG` overrides the
/// configured filters entirely.
pub fn setup_logger(log_config: &LogConfig) {
    let mut filter = EnvFilter::new("info");
    for item in &log_config.filters {
        match format!("{}={}", item.module, item.level).parse::<Directive>() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("ignoring log filter `{}={}`: {e}", item.module, item.level),
        }
    }
    if let Ok(env) = EnvFilter::try_from_default_env() {
        filter = env;
    }
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
