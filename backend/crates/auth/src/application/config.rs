//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once by the binary
//! and shared read-only behind an `Arc`.

use jsonwebtoken::Algorithm;
use std::fmt;
use std::time::Duration;

/// Default access token lifetime (30 minutes)
pub const DEFAULT_ACCESS_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);
/// Default refresh token lifetime (30 days)
pub const DEFAULT_REFRESH_TOKEN_TTL: Duration = Duration::from_secs(30 * 24 * 3600);
/// Default `iss` claim
pub const DEFAULT_ISSUER: &str = "medicitas";

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC signing secret. Must be stable across restarts.
    pub jwt_secret: Vec<u8>,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    /// Fixed to HS256
    pub algorithm: Algorithm,
    pub issuer: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_token_ttl: DEFAULT_ACCESS_TOKEN_TTL,
            refresh_token_ttl: DEFAULT_REFRESH_TOKEN_TTL,
            algorithm: Algorithm::HS256,
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }

    /// Create config with a random secret (for development).
    ///
    /// Every restart invalidates all outstanding tokens.
    pub fn development() -> Self {
        tracing::warn!("Using a random JWT secret; tokens will not survive a restart");
        Self::new(platform::crypto::random_secret(32))
    }

    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    pub fn with_refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Access token lifetime in seconds, reported as `expires_in`
    pub fn expires_in_secs(&self) -> i64 {
        self.access_token_ttl.as_secs() as i64
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new("secret");
        assert_eq!(config.expires_in_secs(), 1800);
        assert_eq!(config.refresh_token_ttl, Duration::from_secs(2_592_000));
        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.issuer, "medicitas");
    }

    #[test]
    fn test_development_secrets_differ() {
        let a = AuthConfig::development();
        let b = AuthConfig::development();
        assert_eq!(a.jwt_secret.len(), 43);
        assert_ne!(a.jwt_secret, b.jwt_secret);
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = AuthConfig::new("hunter2-secret");
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
