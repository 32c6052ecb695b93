//! In-Memory Repository
//!
//! Process-local implementation of the repository traits. Backs the
//! application and HTTP tests and local experiments without Postgres.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entity::{refresh_token::RefreshToken, user::User};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_id::{RefreshTokenId, UserId},
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    refresh_tokens: HashMap<RefreshTokenId, RefreshToken>,
}

/// In-memory auth repository. Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AuthResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| AuthError::Internal("Memory repository lock poisoned".to_string()))
    }

    /// Look up a refresh token row regardless of state
    pub fn refresh_token_by_value(&self, token: &str) -> Option<RefreshToken> {
        let tables = self.lock().ok()?;
        tables
            .refresh_tokens
            .values()
            .find(|t| t.token == token)
            .cloned()
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for MemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut tables = self.lock()?;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::DuplicateEmail);
        }
        tables.users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.lock()?.users.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.lock()?.users.values().any(|u| &u.email == email))
    }

    async fn update_last_access(&self, user_id: &UserId, at: DateTime<Utc>) -> AuthResult<()> {
        if let Some(user) = self.lock()?.users.get_mut(user_id) {
            user.record_access(at);
        }
        Ok(())
    }

    async fn set_active(&self, user_id: &UserId, is_active: bool) -> AuthResult<Option<User>> {
        let mut tables = self.lock()?;
        let Some(user) = tables.users.get_mut(user_id) else {
            return Ok(None);
        };
        if is_active {
            user.activate();
        } else {
            user.deactivate();
        }
        Ok(Some(user.clone()))
    }

    async fn list(&self, offset: i64, limit: i64) -> AuthResult<Vec<User>> {
        let tables = self.lock()?;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);

        Ok(users
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }
}

// ============================================================================
// Refresh Token Repository Implementation
// ============================================================================

impl RefreshTokenRepository for MemoryAuthRepository {
    async fn create(&self, token: &RefreshToken) -> AuthResult<()> {
        let mut tables = self.lock()?;
        if tables.refresh_tokens.values().any(|t| t.token == token.token) {
            return Err(AuthError::Internal("Duplicate refresh token".to_string()));
        }
        tables.refresh_tokens.insert(token.id, token.clone());
        Ok(())
    }

    async fn find_active(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<RefreshToken>> {
        Ok(self
            .lock()?
            .refresh_tokens
            .values()
            .find(|t| t.token == token && t.is_usable(now))
            .cloned())
    }

    async fn deactivate(&self, id: &RefreshTokenId) -> AuthResult<bool> {
        let mut tables = self.lock()?;
        match tables.refresh_tokens.get_mut(id) {
            Some(t) if t.is_active => {
                t.revoke();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_by_token(&self, token: &str) -> AuthResult<Option<RefreshToken>> {
        let mut tables = self.lock()?;
        let Some(row) = tables
            .refresh_tokens
            .values_mut()
            .find(|t| t.token == token && t.is_active)
        else {
            return Ok(None);
        };
        row.revoke();
        Ok(Some(row.clone()))
    }
}
