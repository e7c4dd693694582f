//! Telemetry initialisation for the capstan binary.
//!
//! The engine emits `tracing` events at the fixed observation points of a
//! patch cycle; this module installs the subscriber that renders them.
//! Logging is purely observational and never affects control flow.

use std::io;

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

use crate::cli::LogFormat;

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Installs the global tracing subscriber once; later calls are no-ops.
///
/// `quiet` drops the default level to errors only. A `RUST_LOG` environment
/// filter overrides the default level either way.
pub(crate) fn initialise(quiet: bool, format: LogFormat) {
    INSTALLED.get_or_init(|| {
        let default_level = if quiet { "error" } else { "info" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        match format {
            LogFormat::Json => drop(
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(io::stderr)
                    .json()
                    .try_init(),
            ),
            LogFormat::Compact => drop(
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(io::stderr)
                    .with_target(false)
                    .compact()
                    .try_init(),
            ),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialise_is_idempotent() {
        initialise(false, LogFormat::Compact);
        initialise(true, LogFormat::Json);

        assert!(INSTALLED.get().is_some());
    }
}
