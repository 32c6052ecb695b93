//! Sign In Use Case
//!
//! Authenticates a user and issues an access/refresh token pair.

use chrono::Utc;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_codec::TokenCodec;
use crate::domain::entity::{refresh_token::RefreshToken, user::User};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Tokens handed to the client after login or refresh
#[derive(Debug, Clone)]
pub struct TokenBundle {
    pub access_token: String,
    pub refresh_token: String,
    /// Always `"bearer"`
    pub token_type: &'static str,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Sign in use case
pub struct SignInUseCase<U, T>
where
    U: UserRepository,
    T: RefreshTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    codec: TokenCodec,
    config: Arc<AuthConfig>,
}

impl<U, T> SignInUseCase<U, T>
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

    pub async fn execute(&self, input: SignInInput) -> AuthResult<TokenBundle> {
        let user = self
            .authenticate(&input.email, input.password)
            .await?
            .ok_or(AuthError::AuthenticationFailed)?;

        self.create_tokens(&user).await
    }

    /// Returns `None` for an unknown email, an inactive account or a wrong
    /// password alike.
    pub async fn authenticate(&self, email: &str, password: String) -> AuthResult<Option<User>> {
        let Ok(email) = Email::new(email) else {
            return Ok(None);
        };

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            return Ok(None);
        };

        if !user.can_login() {
            return Ok(None);
        }

        let raw_password = RawPassword::for_verification(password);
        if !user.password_hash.verify(&raw_password) {
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Issue a new session for `user`. Existing sessions stay valid.
    pub async fn create_tokens(&self, user: &User) -> AuthResult<TokenBundle> {
        let subject = user.email.as_str();

        let access = self
            .codec
            .create_access(subject, &user.user_id, user.user_role)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let refresh = self
            .codec
            .create_refresh(subject, &user.user_id)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let row = RefreshToken::new(user.user_id, refresh.token.clone(), refresh.expires_at);
        self.token_repo.create(&row).await?;

        self.user_repo
            .update_last_access(&user.user_id, Utc::now())
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.user_role,
            "User signed in"
        );

        Ok(TokenBundle {
            access_token: access.token,
            refresh_token: refresh.token,
            token_type: "bearer",
            expires_in: self.config.expires_in_secs(),
        })
    }
}
