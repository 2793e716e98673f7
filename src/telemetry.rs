//! Logging setup for the salary calculator binary.
//!
//! Logs go to stderr so they never interleave with the form on stdout.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The log filter could not be parsed.
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter {
        /// The filter text.
        value: String,
        /// The parse failure.
        #[source]
        source: ParseError,
    },

    /// A global subscriber was already installed.
    #[error("telemetry error: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Installs a compact fmt subscriber on stderr.
///
/// `RUST_LOG` takes precedence over `log_level`.
pub fn init(log_level: &str) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level).map_err(|source| TelemetryError::EnvFilter {
            value: log_level.to_string(),
            source,
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_subscriber_error_keeps_its_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::AlreadyExists, "already set");
        let error = TelemetryError::Subscriber(Box::new(cause));

        let source = error.source().expect("Subscriber error should have a source");
        assert_eq!(source.to_string(), "already set");
        assert_eq!(error.to_string(), "telemetry error: already set");
    }

    #[test]
    fn test_invalid_filter_is_reported() {
        // RUST_LOG overrides the argument.
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        match init("salary_calculator=notalevel") {
            Err(TelemetryError::EnvFilter { value, .. }) => {
                assert_eq!(value, "salary_calculator=notalevel");
            }
            other => panic!("Expected EnvFilter error, got {:?}", other.err()),
        }
    }
}
