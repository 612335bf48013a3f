use crate::config::{LogFormat, TelemetryConfig};
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "APP_LOG_LEVEL '{value}' is not a valid tracing filter")
            }
            TelemetryError::Subscriber(err) => {
                write!(f, "failed to install tracing subscriber: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `APP_LOG_LEVEL`.
///
/// JSON output flattens event fields next to the message so report counts stay queryable.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => configured_filter(&config.log_level)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false);

    let installed = match config.format {
        LogFormat::Compact => builder.with_target(false).compact().try_init(),
        LogFormat::Json => builder
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .try_init(),
    };

    installed.map_err(TelemetryError::Subscriber)
}

fn configured_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(log_level).map_err(|source| TelemetryError::EnvFilter {
        value: log_level.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_levels_and_per_crate_directives() {
        assert!(configured_filter("info").is_ok());
        assert!(configured_filter("warn,landing_compliance=debug").is_ok());
    }

    #[test]
    fn rejects_unknown_level_naming_the_variable() {
        let err = configured_filter("landing_compliance=chatty").expect_err("invalid level");
        match &err {
            TelemetryError::EnvFilter { value, .. } => assert_eq!(value, "landing_compliance=chatty"),
            other => panic!("expected filter error, got {other:?}"),
        }
        assert!(err.to_string().starts_with("APP_LOG_LEVEL"));
    }
}
