//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the availability monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Backend endpoint configuration.
    pub backend: BackendConfig,

    /// Polling cadence and probe timeout.
    pub poll: PollConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Backend endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the monitored backend (e.g., "https://api.example.com").
    /// Overridable via the `BACKEND_URL` environment variable.
    pub base_url: String,

    /// Path of the health endpoint, relative to the base URL.
    pub health_path: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            health_path: "/health".to_string(),
        }
    }
}

/// Polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollConfig {
    /// Seconds between scheduled probes.
    pub interval_secs: u64,

    /// Per-probe request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            timeout_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MonitorConfig::default();
        assert_eq!(config.poll.interval_secs, 30);
        assert_eq!(config.poll.timeout_secs, 10);
        assert_eq!(config.backend.health_path, "/health");
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: MonitorConfig = toml::from_str(
            r#"
            [backend]
            base_url = "https://api.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "https://api.example.com");
        assert_eq!(config.backend.health_path, "/health");
        assert_eq!(config.poll.interval_secs, 30);
    }
}
