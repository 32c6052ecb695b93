//! Access Guard
//!
//! Resolves a bearer access token to the currently active user.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_codec::{TokenCodec, TokenError};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{token_kind::TokenKind, user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Authenticated identity for the rest of the request
#[derive(Debug, Clone)]
pub struct Principal {
    pub user: User,
}

impl Principal {
    pub fn user_id(&self) -> UserId {
        self.user.user_id
    }

    pub fn role(&self) -> UserRole {
        self.user.user_role
    }
}

/// Access guard
pub struct AccessGuard<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    codec: TokenCodec,
}

impl<U> AccessGuard<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            codec: TokenCodec::new(config),
        }
    }

    /// The user's current state wins over the token: a deactivated user is
    /// rejected even while their access token is unexpired.
    pub async fn resolve(&self, bearer: &str) -> AuthResult<Principal> {
        let claims = match self.codec.decode(bearer) {
            Ok(claims) => claims,
            Err(TokenError::Expired) => {
                tracing::debug!("Expired access token");
                return Err(AuthError::Unauthorized);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rejected access token");
                return Err(AuthError::Unauthorized);
            }
        };

        if claims.kind != TokenKind::Access || claims.sub.is_empty() {
            return Err(AuthError::Unauthorized);
        }

        let user = self
            .user_repo
            .find_by_id(&claims.user_id())
            .await?
            .filter(User::can_login)
            .ok_or(AuthError::Unauthorized)?;

        Ok(Principal { user })
    }
}
