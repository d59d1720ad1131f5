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

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::EnvFilter {
                value: config.log_level.clone(),
                source,
            })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

/// Per-request logger name, built up as the request moves through the pipeline.
///
/// Each call owns its own context; nothing is accumulated on shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    logger: String,
}

impl RequestContext {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            logger: root.into(),
        }
    }

    pub fn child(&self, segment: &str) -> Self {
        Self {
            logger: format!("{}.{}", self.logger, segment),
        }
    }

    pub fn logger(&self) -> &str {
        &self.logger
    }
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.logger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_contexts_do_not_mutate_parent() {
        let root = RequestContext::new("permitlist");
        let first = root.child("get_permit_list").child("retail");
        let second = root.child("get_permit_list").child("retail_legacy");

        assert_eq!(root.logger(), "permitlist");
        assert_eq!(first.logger(), "permitlist.get_permit_list.retail");
        assert_eq!(second.to_string(), "permitlist.get_permit_list.retail_legacy");
    }

    #[test]
    fn invalid_filter_is_reported() {
        std::env::remove_var("RUST_LOG");
        let config = TelemetryConfig {
            log_level: "permit_list=loud".to_string(),
        };
        match init(&config) {
            Err(TelemetryError::EnvFilter { value, .. }) => assert_eq!(value, "permit_list=loud"),
            other => panic!("expected filter error, got {other:?}"),
        }
    }
}
