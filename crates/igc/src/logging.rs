//! Logging setup for igc.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary. Log output goes to stderr so that decoded records written
//! to stdout stay machine-readable.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Warnings and errors.
    #[default]
    Normal,
    /// Per-file decoding summaries.
    Verbose,
    /// Per-line diagnostics such as unmatched lines and midnight crossings.
    Trace,
}

impl Verbosity {
    /// Derive verbosity from `-q` and a `-v` count.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Trace,
        }
    }

    /// Convert verbosity to tracing level filter.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Default `EnvFilter` directive for this verbosity.
    #[must_use]
    pub fn filter_directive(&self) -> String {
        format!("igc={}", self.to_level_filter())
    }
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over `verbosity` when set. Calling this more
/// than once is harmless; only the first call installs a subscriber.
///
/// # Examples
///
/// ```no_run
/// use igc::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(false)
            .with_line_number(false),
    );

    let _ = subscriber.try_init();
}

/// Initialize logging for tests.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("igc=trace")
        .with_test_writer()
        .try_init();
}
