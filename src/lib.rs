// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod goals;
pub mod ingest;
pub mod matrix;
pub mod metrics;
pub mod mirror;
pub mod models;
pub mod recurring;
pub mod session;
pub mod store;
pub mod taxonomy;
pub mod utils;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global subscriber once. `RUST_LOG` overrides the
/// `moneyhub=warn` default.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("moneyhub=warn"));

        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    });
}
