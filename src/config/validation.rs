//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals > 0, URL parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Runs after env/CLI overrides, before the monitor starts

use thiserror::Error;
use url::Url;

use crate::config::schema::MonitorConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("backend.base_url {value:?} is not a valid URL: {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },

    #[error("backend.base_url {0:?} must use http or https")]
    UnsupportedScheme(String),

    #[error("backend.health_path {0:?} must start with '/'")]
    InvalidHealthPath(String),

    #[error("poll.interval_secs must be greater than zero")]
    ZeroInterval,

    #[error("poll.timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.backend.base_url) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::UnsupportedScheme(
                    config.backend.base_url.clone(),
                ));
            }
        }
        Err(source) => errors.push(ValidationError::InvalidBaseUrl {
            value: config.backend.base_url.clone(),
            source,
        }),
    }

    if !config.backend.health_path.starts_with('/') {
        errors.push(ValidationError::InvalidHealthPath(
            config.backend.health_path.clone(),
        ));
    }

    if config.poll.interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval);
    }

    if config.poll.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
