//! Log output of the partnership recorder.
//!
//! Logs go to stderr so they never mix with the tables and charts printed on
//! stdout.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much log output to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Warnings and above
    #[default]
    Normal,
    /// Info and above
    Verbose,
    /// Everything down to debug
    Debug,
}

impl Verbosity {
    /// Picks a verbosity from the number of `-v` flags, `-q` wins
    pub fn from_flags(verbose: u64, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Debug,
        }
    }

    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Debug => Level::DEBUG,
        }
    }
}

/// Installs the global subscriber
///
/// `RUST_LOG` takes precedence over `verbosity`. Calling this more than once
/// keeps the first subscriber.
pub fn init_logging(verbosity: Verbosity) {
    let default_filter = format!("orphanage_partnerships={}", verbosity.level());
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(Verbosity::from_flags(3, true), Verbosity::Quiet);
    }

    #[test]
    fn verbose_flags_raise_level() {
        assert_eq!(Verbosity::from_flags(0, false).level(), Level::WARN);
        assert_eq!(Verbosity::from_flags(1, false).level(), Level::INFO);
        assert_eq!(Verbosity::from_flags(2, false).level(), Level::DEBUG);
        assert_eq!(Verbosity::from_flags(7, false).level(), Level::DEBUG);
    }

    #[test]
    fn init_logging_twice_does_not_panic() {
        init_logging(Verbosity::Quiet);
        init_logging(Verbosity::Debug);
    }
}
