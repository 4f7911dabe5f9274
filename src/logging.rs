//! Structured logging setup
//!
//! The library only emits `tracing` events. Binaries call [`init_logging`] once
//! to install a subscriber; `RUST_LOG` takes precedence over the level passed in.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {}", e);
    }
}
