//! Refresh Use Case
//!
//! Exchanges a stored refresh token for a new access token. The refresh
//! token itself is returned unchanged and stays valid until it expires or
//! is logged out.

use chrono::Utc;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::sign_in::TokenBundle;
use crate::application::token_codec::TokenCodec;
use crate::domain::entity::refresh_token::RefreshToken;
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::value_object::token_kind::TokenKind;
use crate::error::{AuthError, AuthResult};

/// Refresh use case
pub struct RefreshUseCase<U, T>
where
    U: UserRepository,
    T: RefreshTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    codec: TokenCodec,
    config: Arc<AuthConfig>,
}

impl<U, T> RefreshUseCase<U, T>
where
    U: UserRepository,
    T: RefreshTokenRepository,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            token_repo,
            codec: TokenCodec::new(config.clone()),
            config,
        }
    }

    pub async fn execute(&self, refresh_token: &str) -> AuthResult<TokenBundle> {
        let row = self
            .token_repo
            .find_active(refresh_token, Utc::now())
            .await?
            .ok_or(AuthError::InvalidOrExpiredToken)?;

        // A stored token that no longer decodes as a refresh token is burned.
        let claims = match self.codec.decode(refresh_token) {
            Ok(claims) if claims.kind == TokenKind::Refresh => claims,
            _ => {
                self.burn(&row, "undecodable").await?;
                return Err(AuthError::InvalidOrExpiredToken);
            }
        };

        let user = match self.user_repo.find_by_id(&row.user_id).await? {
            Some(user) if user.can_login() => user,
            _ => {
                self.burn(&row, "owner missing or inactive").await?;
                return Err(AuthError::InvalidUser);
            }
        };

        let access = self
            .codec
            .create_access(&claims.sub, &user.user_id, user.user_role)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.user_id, "Access token refreshed");

        Ok(TokenBundle {
            access_token: access.token,
            refresh_token: refresh_token.to_string(),
            token_type: "bearer",
            expires_in: self.config.expires_in_secs(),
        })
    }

    async fn burn(&self, row: &RefreshToken, reason: &'static str) -> AuthResult<()> {
        self.token_repo.deactivate(&row.id).await?;
        tracing::warn!(
            token_id = %row.id,
            user_id = %row.user_id,
            reason,
            "Refresh token invalidated"
        );
        Ok(())
    }
}
