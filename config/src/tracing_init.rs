//! Stderr fmt subscriber for binaries and demos.

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Error, Debug)]
#[error("install tracing subscriber: {0}")]
pub struct TracingInitError(String);

/// Installs a global fmt layer on stderr. `RUST_LOG` wins over `default_filter`
/// (e.g. `"weft=info"`). Fails if a global subscriber is already set.
pub fn init_tracing(default_filter: &str) -> Result<(), TracingInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(filter),
        )
        .try_init()
        .map_err(|e| TracingInitError(e.to_string()))
}
