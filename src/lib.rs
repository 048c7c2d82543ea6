pub mod budget;
pub mod catalog;
pub mod cli;
pub mod coerce;
pub mod config;
pub mod db;
pub mod error;
pub mod estimator;
pub mod handlers;
pub mod materials;
pub mod metrics;
pub mod server;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// Note: This function can only be called once per process.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
