//! Tracing setup for the figure renderer.
//!
//! Subscriber installation is opt-in (feature `telemetry`). The
//! `render_figures` binary installs one; library consumers bring their own.

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to `info`.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing("info")
}

/// Installs a compact `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `fallback_directive` (for example
/// `"debug"` or `"schlieren_figures=trace"`) is used. Returns `false` when the
/// feature is disabled or a global subscriber is already installed.
#[must_use]
pub fn init_tracing(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
