//! Refresh Token Entity
//!
//! Server-side mirror of an issued refresh token. Rows are never deleted;
//! revocation clears `is_active`.

use chrono::{DateTime, Utc};

use crate::domain::value_object::user_id::{RefreshTokenId, UserId};

#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub id: RefreshTokenId,
    /// Owning user (cascade on delete)
    pub user_id: UserId,
    /// Signed token string, unique
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    pub fn new(user_id: UserId, token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: RefreshTokenId::new(),
            user_id,
            token,
            expires_at,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Active and not yet expired at `now`
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.is_active && now < self.expires_at
    }

    pub fn revoke(&mut self) {
        self.is_active = false;
    }
}
