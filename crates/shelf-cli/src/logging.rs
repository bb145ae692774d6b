//! Logging setup for the binary.
//!
//! Libraries only emit `tracing` events; this module installs the subscriber.
//! Logs go to stderr so that rendered pages and JSON on stdout stay clean.
//!
//! # Log Levels
//!
//! - `warn`: load failures, quote recovery
//! - `info`: load summaries (default)
//! - `debug`: each recompute, dropped rows
//! - `trace`: query selection details

use std::io;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATES: [&str; 4] = ["shelf", "shelf_cli", "shelf_ingest", "shelf_seeker"];

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for this workspace's crates.
    pub level: Level,
    /// Whether to use ANSI colors.
    pub with_ansi: bool,
    /// Whether to include the module path.
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_ansi: true,
            with_target: false,
        }
    }
}

impl LogConfig {
    /// - 0: warn
    /// - 1 (`-v`): info
    /// - 2 (`-vv`): debug
    /// - 3+: trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            with_target: verbosity >= 2,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    /// Directive string used when `RUST_LOG` is not set.
    pub fn directives(&self) -> String {
        let level = self.level.as_str().to_lowercase();
        let mut directives = vec!["warn".to_string()];
        directives.extend(CRATES.iter().map(|krate| format!("{krate}={level}")));
        directives.join(",")
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_logging(config: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directives()));
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(config.with_target)
        .without_time();

    tracing_subscriber::registry().with(filter).with(layer).init();
}
