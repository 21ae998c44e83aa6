use crate::config::TelemetryConfig;
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
                write!(
                    f,
                    "invalid log level/filter '{}': unable to build EnvFilter",
                    value
                )
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
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

/// Filter for audit runs: the configured level applies globally, with the
/// scoring engine pinned to at least `warn` so the interpreter's
/// conservative-fallback warnings stay visible under a quieter global
/// level.
fn audit_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    let directives = format!("{level},melma_audit::audit=warn");
    EnvFilter::try_new(&directives).map_err(|source| TelemetryError::EnvFilter {
        value: directives,
        source,
    })
}

/// Initialize process-wide tracing. An explicit RUST_LOG wins; otherwise
/// the configured level is expanded by [`audit_filter`].
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => audit_filter(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_plain_levels() {
        assert!(audit_filter("info").is_ok());
        assert!(audit_filter("error").is_ok());
        assert!(audit_filter("melma_audit_api=debug").is_ok());
    }

    #[test]
    fn filter_reports_the_full_directive_string_on_error() {
        let err = audit_filter("melma=notalevel").expect_err("invalid level rejected");
        match err {
            TelemetryError::EnvFilter { value, .. } => {
                assert_eq!(value, "melma=notalevel,melma_audit::audit=warn");
            }
            other => panic!("expected env-filter error, got {other:?}"),
        }
    }
}
