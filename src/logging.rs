//! Diagnostic logging.
//!
//! Progress lines go to stdout with `println!`. Everything else is a
//! `tracing` event on stderr, filtered by `RUST_LOG` (default `warn`).
//! `RUST_LOG=pdbg_config=debug` shows where each setting came from.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr subscriber. Fails if one is already installed.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
