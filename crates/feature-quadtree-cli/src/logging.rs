/*!
Logging and profiling setup for the command line tool.

Two implementations share one API:

- real: compiled only with `feature = "profiling"`. Adds a tracing-chrome
  layer next to the fmt layer; the returned guard flushes a `trace-*.json`
  file (viewable in Perfetto or chrome://tracing) when dropped.
- stub: compiled otherwise. Logging only.

Top-level API (always available):
- `setup_logging_and_profiling() -> LoggingGuard`
*/

/// Sets a default `RUST_LOG` when the user did not provide one.
fn default_log_filter() {
    if std::env::var("RUST_LOG").is_err() {
        // Safety: single-threaded at startup
        unsafe {
            if cfg!(debug_assertions) {
                std::env::set_var("RUST_LOG", "debug,feature_quadtree=info");
            } else {
                std::env::set_var("RUST_LOG", "info");
            }
        }
    }
}

#[cfg(feature = "profiling")]
mod inner {
    use tracing_chrome::{ChromeLayerBuilder, FlushGuard};
    use tracing_subscriber::prelude::*;

    /// Keeps the trace file open until dropped
    pub struct LoggingGuard {
        _flush: FlushGuard,
    }

    /// Initialize logging plus chrome trace recording.
    pub fn setup_logging_and_profiling() -> LoggingGuard {
        use tracing_subscriber::EnvFilter;
        use tracing_subscriber::fmt;

        super::default_log_filter();

        let (chrome_layer, guard) = ChromeLayerBuilder::new().include_args(true).build();
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_default_env());

        tracing_subscriber::registry()
            .with(chrome_layer)
            .with(fmt_layer)
            .init();

        tracing::info!("Tracing initialized with chrome profiling layer");
        LoggingGuard { _flush: guard }
    }
}

#[cfg(not(feature = "profiling"))]
mod inner {
    use tracing_subscriber::prelude::*;

    /// Nothing to flush without profiling
    pub struct LoggingGuard;

    /// Initialize logging with sensible defaults; profiling is a no-op here.
    pub fn setup_logging_and_profiling() -> LoggingGuard {
        use tracing_subscriber::EnvFilter;
        use tracing_subscriber::fmt;

        super::default_log_filter();

        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_default_env());
        tracing_subscriber::registry().with(fmt_layer).init();

        tracing::debug!("Logging initialized (profiling disabled in this build)");
        LoggingGuard
    }
}

// Re-export a stable API surface regardless of which `inner` module was compiled.
pub use inner::{LoggingGuard, setup_logging_and_profiling};
