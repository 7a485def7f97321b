//! Tracing setup for hosts and the headless driver.
//!
//! The library only emits `tracing` events. Hosts either install their own
//! subscriber or call `init_default_tracing` with the `telemetry` feature.

/// Filter used when `RUST_LOG` is unset: workflow transitions at `info`,
/// everything else (HTTP client internals included) at `warn`.
pub const DEFAULT_TRACING_FILTER: &str = "warn,chart_playground=info";

/// Installs a compact subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_TRACING_FILTER`].
///
/// Logs go to stderr so stdout stays reserved for the snapshot JSON the
/// headless driver prints; a host can pipe that output straight into a
/// consumer of the JSON contract.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_TRACING_FILTER));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
