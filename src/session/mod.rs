//! Session token sourcing.
//!
//! # Responsibilities
//! - Define the seam to the external authentication session provider
//! - Supply an optional bearer credential for authenticated probes
//!
//! # Design Decisions
//! - Token lookup is best-effort: absence or failure degrades to an
//!   unauthenticated probe, never a probe failure
//! - How the provider obtains or refreshes credentials is out of scope

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the session provider.
///
/// These never surface as probe failures; the prober logs them and proceeds
/// without a credential.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The provider could not produce a current session.
    #[error("session lookup failed: {0}")]
    Lookup(String),
}

/// External provider of an optional bearer credential.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Return the current access token, if a session exists.
    async fn current_token(&self) -> Result<Option<String>, TokenError>;
}

/// Token source for deployments without authentication.
pub struct NoAuth;

#[async_trait]
impl TokenSource for NoAuth {
    async fn current_token(&self) -> Result<Option<String>, TokenError> {
        Ok(None)
    }
}

/// Fixed token supplied via configuration or a CLI flag.
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn current_token(&self) -> Result<Option<String>, TokenError> {
        Ok(Some(self.token.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_auth_yields_no_token() {
        assert_eq!(NoAuth.current_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_static_token_yields_token() {
        let source = StaticToken::new("abc123");
        assert_eq!(
            source.current_token().await.unwrap(),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_token_error_display() {
        let err = TokenError::Lookup("store offline".into());
        assert_eq!(err.to_string(), "session lookup failed: store offline");
    }
}
