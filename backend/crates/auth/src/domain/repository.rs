//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};

use crate::domain::entity::{refresh_token::RefreshToken, user::User};
use crate::domain::value_object::{
    email::Email,
    user_id::{RefreshTokenId, UserId},
};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user.
    ///
    /// Fails with `AuthError::DuplicateEmail` when the email is taken, even
    /// if a prior `exists_by_email` check passed.
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email (exact match)
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Set `last_access` after a successful login
    async fn update_last_access(&self, user_id: &UserId, at: DateTime<Utc>) -> AuthResult<()>;

    /// Set the active flag. Returns the updated user, `None` if absent.
    async fn set_active(&self, user_id: &UserId, is_active: bool) -> AuthResult<Option<User>>;

    /// Page of users ordered by creation time
    async fn list(&self, offset: i64, limit: i64) -> AuthResult<Vec<User>>;
}

/// Refresh token repository trait
#[trait_variant::make(RefreshTokenRepository: Send)]
pub trait LocalRefreshTokenRepository {
    /// Persist a newly issued refresh token
    async fn create(&self, token: &RefreshToken) -> AuthResult<()>;

    /// Find a row matching `token` that is active and expires after `now`
    async fn find_active(&self, token: &str, now: DateTime<Utc>)
    -> AuthResult<Option<RefreshToken>>;

    /// Mark a row inactive. Returns `false` if it was already inactive.
    async fn deactivate(&self, id: &RefreshTokenId) -> AuthResult<bool>;

    /// Mark the active row matching `token` inactive, expired or not.
    /// Returns the revoked row, `None` if no active row matches.
    async fn revoke_by_token(&self, token: &str) -> AuthResult<Option<RefreshToken>>;
}
