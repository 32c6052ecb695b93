//! Token Codec
//!
//! Signs and verifies the HS256 JWTs handed to clients. Access tokens carry
//! the role for cheap authorization; refresh tokens do not and are mirrored
//! in the `refresh_tokens` table so they can be revoked.
//!
//! The codec is stateless: everything needed to validate a token is in the
//! token itself plus the configured secret.

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::{
    token_kind::TokenKind, user_id::UserId, user_role::UserRole,
};

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    #[error("Token lifetime out of range")]
    Lifetime,

    #[error("Token encoding error: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    /// Subject (user email)
    pub sub: String,
    pub user_id: Uuid,
    /// Present on access tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
    /// Unique token id, keeps same-second tokens distinct
    pub jti: Uuid,
    pub iss: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
}

impl TokenClaims {
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.user_id)
    }
}

/// A freshly signed token with its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// HS256 encoder/decoder bound to one configuration
#[derive(Clone)]
pub struct TokenCodec {
    config: Arc<AuthConfig>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            validation,
            config,
        }
    }

    /// Access token: `{sub, user_id, role, exp, type: "access"}`
    pub fn create_access(
        &self,
        subject: &str,
        user_id: &UserId,
        role: UserRole,
    ) -> Result<IssuedToken, TokenError> {
        self.issue(subject, user_id, Some(role), TokenKind::Access)
    }

    /// Refresh token: `{sub, user_id, exp, type: "refresh"}`, no role
    pub fn create_refresh(&self, subject: &str, user_id: &UserId) -> Result<IssuedToken, TokenError> {
        self.issue(subject, user_id, None, TokenKind::Refresh)
    }

    fn issue(
        &self,
        subject: &str,
        user_id: &UserId,
        role: Option<UserRole>,
        kind: TokenKind,
    ) -> Result<IssuedToken, TokenError> {
        let ttl = match kind {
            TokenKind::Access => self.config.access_token_ttl,
            TokenKind::Refresh => self.config.refresh_token_ttl,
        };
        let ttl = chrono::Duration::from_std(ttl).map_err(|_| TokenError::Lifetime)?;

        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl).ok_or(TokenError::Lifetime)?;

        let claims = TokenClaims {
            sub: subject.to_string(),
            user_id: *user_id.as_uuid(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
            iss: self.config.issuer.clone(),
            kind,
        };

        Ok(IssuedToken {
            token: self.encode(&claims)?,
            expires_at,
        })
    }

    /// Sign arbitrary claims with the configured secret
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        encode(&Header::new(self.config.algorithm), claims, &self.encoding_key)
            .map_err(TokenError::Encoding)
    }

    /// Verify signature, issuer and expiration
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        use jsonwebtoken::errors::ErrorKind;

        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(Arc::new(AuthConfig::new("test-secret")))
    }

    #[test]
    fn test_access_token_claims() {
        let codec = codec();
        let user_id = UserId::new();
        let issued = codec
            .create_access("alice@example.com", &user_id, UserRole::Patient)
            .unwrap();

        let claims = codec.decode(&issued.token).unwrap();
        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.role, Some(UserRole::Patient));
        assert_eq!(claims.kind, TokenKind::Access);

        let ahead = claims.exp - Utc::now().timestamp();
        assert!((1795..=1800).contains(&ahead));
    }

    #[test]
    fn test_refresh_token_has_no_role() {
        let codec = codec();
        let issued = codec.create_refresh("alice@example.com", &UserId::new()).unwrap();

        let claims = codec.decode(&issued.token).unwrap();
        assert_eq!(claims.kind, TokenKind::Refresh);
        assert!(claims.role.is_none());

        let ahead = claims.exp - Utc::now().timestamp();
        assert!((30 * 86_400 - 5..=30 * 86_400).contains(&ahead));
    }

    #[test]
    fn test_type_claim_on_the_wire() {
        let codec = codec();
        let issued = codec.create_refresh("a@b.co", &UserId::new()).unwrap();

        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        let raw = decode::<serde_json::Value>(&issued.token, &DecodingKey::from_secret(b""), &validation)
            .unwrap()
            .claims;
        assert_eq!(raw["type"], "refresh");
        assert!(raw.get("role").is_none());
    }

    #[test]
    fn test_same_second_tokens_differ() {
        let codec = codec();
        let user_id = UserId::new();
        let a = codec.create_refresh("a@b.co", &user_id).unwrap();
        let b = codec.create_refresh("a@b.co", &user_id).unwrap();
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn test_expired_is_distinct_from_invalid() {
        let codec = codec();
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: "a@b.co".to_string(),
            user_id: Uuid::new_v4(),
            role: None,
            iat: now - 120,
            exp: now - 60,
            jti: Uuid::new_v4(),
            iss: "medicitas".to_string(),
            kind: TokenKind::Access,
        };
        let token = codec.encode(&claims).unwrap();

        assert!(matches!(codec.decode(&token), Err(TokenError::Expired)));
        assert!(matches!(codec.decode("not.a.jwt"), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_foreign_secret_is_invalid() {
        let other = TokenCodec::new(Arc::new(AuthConfig::new("other-secret")));
        let issued = other
            .create_access("a@b.co", &UserId::new(), UserRole::Doctor)
            .unwrap();

        assert!(matches!(codec().decode(&issued.token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_foreign_issuer_is_invalid() {
        let other = TokenCodec::new(Arc::new(AuthConfig::new("test-secret").with_issuer("other")));
        let issued = other.create_refresh("a@b.co", &UserId::new()).unwrap();

        assert!(matches!(codec().decode(&issued.token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_out_of_range_lifetime_is_an_error() {
        let far = AuthConfig::new("test-secret")
            .with_refresh_token_ttl(std::time::Duration::from_secs(100_000_000 * 86_400));
        let codec = TokenCodec::new(Arc::new(far));
        assert!(matches!(
            codec.create_refresh("a@b.co", &UserId::new()),
            Err(TokenError::Lifetime)
        ));

        let unbounded = AuthConfig::new("test-secret").with_access_token_ttl(std::time::Duration::MAX);
        let codec = TokenCodec::new(Arc::new(unbounded));
        assert!(matches!(
            codec.create_access("a@b.co", &UserId::new(), UserRole::Patient),
            Err(TokenError::Lifetime)
        ));
    }
}
