//! Optional tracing setup for binaries and benchmarks embedding the
//! engine.
//!
//! The library itself only emits `tracing` events; installing a
//! subscriber is left to the host. This helper wires up the common case:
//! a fmt subscriber filtered by the given directive, overridable through
//! `RUST_LOG`.

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{GraphError, Result};

/// Installs a global fmt subscriber filtered by `directives`
/// (e.g. `"basalt=debug"`), unless `RUST_LOG` overrides it.
///
/// Fails if the directives do not parse or a subscriber is already
/// installed.
pub fn init_logging(directives: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives))
        .map_err(|e| GraphError::InvalidArgument(format!("invalid log filter: {e}")))?;
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .try_init()
        .map_err(|_| GraphError::InvalidArgument("logging already initialized".into()))
}
