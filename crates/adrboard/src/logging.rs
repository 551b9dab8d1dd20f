//! Logging configuration for adrboard.
//!
//! Library code logs through `tracing`; the `adrb` binary installs a
//! subscriber once at startup.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much of a run `adrb` reports on stderr, chosen by `-q` and `-v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Failed loads and failed drafts only.
    Quiet,
    /// Warnings and errors. Keeps command output readable.
    #[default]
    Normal,
    /// Adds store construction and draft task lifecycle.
    Verbose,
    /// Every event the library emits.
    Trace,
}

impl Verbosity {
    /// Most detailed level that reaches the terminal.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Install the stderr subscriber for `adrb`.
///
/// Only events from the `adrboard` target pass, at the level `verbosity`
/// maps to. A `RUST_LOG` directive replaces that filter entirely. Reports
/// printed with `--json` stay on stdout, untouched by log lines. Later calls
/// are no-ops.
///
/// # Examples
///
/// ```no_run
/// use adrboard::{init_logging, logging::Verbosity};
///
/// // `adrb -v list`
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let default_filter = format!("adrboard={}", verbosity.to_level_filter());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    );

    let _ = subscriber.try_init();
}

/// Send `adrboard` debug events to the captured output of the running test.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("adrboard=debug")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_to_level() {
        assert_eq!(Verbosity::Quiet.to_level_filter(), Level::ERROR);
        assert_eq!(Verbosity::Normal.to_level_filter(), Level::WARN);
        assert_eq!(Verbosity::Verbose.to_level_filter(), Level::DEBUG);
        assert_eq!(Verbosity::Trace.to_level_filter(), Level::TRACE);
    }

    #[test]
    fn test_verbosity_default() {
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_init_logging_with_all_verbosity_levels() {
        // Only the first call installs a subscriber.
        init_logging(Verbosity::Quiet);
        init_logging(Verbosity::Normal);
        init_logging(Verbosity::Verbose);
        init_logging(Verbosity::Trace);
    }
}
