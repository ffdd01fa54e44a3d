//! Health probing.
//!
//! # Responsibilities
//! - Perform one authenticated probe of the backend health endpoint
//! - Classify the outcome; never raise an error to the scheduler
//!
//! # Design Decisions
//! - Token lookup is best-effort; a missing or failing session provider
//!   means the probe goes out unauthenticated
//! - Every failure mode carries diagnostic detail for observability
//! - Request timeout is bounded by the transport client, so a probe can
//!   never hang past `poll.timeout_secs`

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::config::MonitorConfig;
use crate::session::TokenSource;

/// Errors that can occur while building a prober.
#[derive(Debug, Error)]
pub enum MonitorSetupError {
    /// Backend base URL or health path did not parse.
    #[error("invalid health endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// HTTP client construction failed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Why a single probe was classified as a failure.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Network-level failure: timeout, DNS, connection refused.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status. Body retained for diagnostics.
    #[error("health endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Backend answered 2xx but the body was not valid JSON.
    #[error("malformed health payload: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

/// Classified outcome of one probe.
#[derive(Debug)]
pub enum ProbeOutcome {
    Success,
    Failure(ProbeError),
}

/// Result of one probe, owned by the scheduler invocation that produced it.
#[derive(Debug)]
pub struct HealthCheckResult {
    pub outcome: ProbeOutcome,
    pub checked_at: SystemTime,
}

impl HealthCheckResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Success)
    }
}

/// Performs authenticated probes against the backend health endpoint.
pub struct HealthProber {
    client: reqwest::Client,
    endpoint: Url,
    tokens: Arc<dyn TokenSource>,
}

impl std::fmt::Debug for HealthProber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthProber")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl HealthProber {
    /// Build a prober from validated configuration.
    pub fn new(
        config: &MonitorConfig,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self, MonitorSetupError> {
        let endpoint =
            Url::parse(&config.backend.base_url)?.join(&config.backend.health_path)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.poll.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            tokens,
        })
    }

    /// Perform one probe. Completes exactly once with exactly one of
    /// Success/Failure; all errors are folded into the result.
    pub async fn probe(&self) -> HealthCheckResult {
        let outcome = match self.dispatch().await {
            Ok(()) => {
                tracing::debug!(endpoint = %self.endpoint, "health probe succeeded");
                ProbeOutcome::Success
            }
            Err(err) => {
                tracing::warn!(endpoint = %self.endpoint, error = %err, "health probe failed");
                ProbeOutcome::Failure(err)
            }
        };

        HealthCheckResult {
            outcome,
            checked_at: SystemTime::now(),
        }
    }

    async fn dispatch(&self) -> Result<(), ProbeError> {
        let mut request = self
            .client
            .get(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json");

        match self.tokens.current_token().await {
            Ok(Some(token)) => {
                tracing::debug!("attaching bearer credential to probe");
                request = request.bearer_auth(token);
            }
            Ok(None) => {
                tracing::debug!("no session token available, probing unauthenticated");
            }
            Err(err) => {
                tracing::warn!(error = %err, "session token lookup failed, probing unauthenticated");
            }
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProbeError::Status { status, body });
        }

        // Body contents are not interpreted beyond parse success.
        serde_json::from_str::<serde_json::Value>(&body)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::NoAuth;

    #[test]
    fn test_prober_builds_endpoint_from_config() {
        let mut config = MonitorConfig::default();
        config.backend.base_url = "https://api.example.com".to_string();
        let prober = HealthProber::new(&config, Arc::new(NoAuth)).unwrap();
        assert_eq!(prober.endpoint.as_str(), "https://api.example.com/health");
    }

    #[test]
    fn test_prober_rejects_bad_base_url() {
        let mut config = MonitorConfig::default();
        config.backend.base_url = "not a url".to_string();
        let err = HealthProber::new(&config, Arc::new(NoAuth)).unwrap_err();
        assert!(matches!(err, MonitorSetupError::InvalidEndpoint(_)));
    }

    #[test]
    fn test_status_error_retains_body() {
        let err = ProbeError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "{\"error\":\"db down\"}".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("db down"));
    }
}
