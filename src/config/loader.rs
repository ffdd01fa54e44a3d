//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::MonitorConfig;
use crate::config::validation::ValidationError;

/// Environment variable that overrides `backend.base_url`.
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

impl From<Vec<ValidationError>> for ConfigError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ConfigError::Validation(errors)
    }
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file.
///
/// Semantic validation is deferred to [`validate_config`] so that env and CLI
/// overrides can be applied to the loaded values first.
///
/// [`validate_config`]: crate::config::validation::validate_config
pub fn load_config(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: MonitorConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Apply process-environment overrides to a loaded configuration.
pub fn apply_env_overrides(config: &mut MonitorConfig) {
    if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
        if !url.is_empty() {
            tracing::debug!(%url, "backend base URL overridden from environment");
            config.backend.base_url = url;
        }
    }
}
