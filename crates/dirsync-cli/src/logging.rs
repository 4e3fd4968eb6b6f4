//! Log output setup

use std::io::{self, IsTerminal};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

impl LogLevel {
    /// Most verbose level let through
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Trace => LevelFilter::TRACE,
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warning => LevelFilter::WARN,
            Self::Error | Self::Critical => LevelFilter::ERROR,
        }
    }
}

/// Install the stderr subscriber
///
/// `RUST_LOG` takes precedence over `level` when it is set.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.filter().into())
        .from_env_lossy();

    // Already installed when called twice
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_maps_to_error() {
        assert_eq!(LogLevel::Critical.filter(), LevelFilter::ERROR);
        assert_eq!(LogLevel::Error.filter(), LevelFilter::ERROR);
    }

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(LogLevel::Warning.filter(), LevelFilter::WARN);
        assert!(LogLevel::Trace.filter() > LogLevel::Info.filter());
    }
}
