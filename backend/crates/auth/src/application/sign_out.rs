//! Sign Out Use Case
//!
//! Revokes one refresh token.

use std::sync::Arc;

use crate::domain::repository::RefreshTokenRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<T>
where
    T: RefreshTokenRepository,
{
    token_repo: Arc<T>,
}

impl<T> SignOutUseCase<T>
where
    T: RefreshTokenRepository,
{
    pub fn new(token_repo: Arc<T>) -> Self {
        Self { token_repo }
    }

    /// Returns `false` when no active row matches; a second call with the
    /// same token therefore returns `false`. Expiry is not checked, so an
    /// active row past its lifetime is still revoked.
    pub async fn execute(&self, refresh_token: &str) -> AuthResult<bool> {
        let Some(row) = self.token_repo.revoke_by_token(refresh_token).await? else {
            tracing::debug!("Sign out with unknown or inactive refresh token");
            return Ok(false);
        };

        tracing::info!(user_id = %row.user_id, token_id = %row.id, "User signed out");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sign_in::SignInUseCase;
    use crate::application::test_support::{seed_user, setup};
    use crate::domain::entity::refresh_token::RefreshToken;
    use crate::domain::value_object::user_role::UserRole;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_second_logout_returns_false() {
        let (repo, config) = setup();
        let user = seed_user(&repo, "alice@example.com", "Passw0rd", UserRole::Patient).await;
        let bundle = SignInUseCase::new(Arc::new(repo.clone()), Arc::new(repo.clone()), config)
            .create_tokens(&user)
            .await
            .unwrap();

        let uc = SignOutUseCase::new(Arc::new(repo.clone()));
        assert!(uc.execute(&bundle.refresh_token).await.unwrap());
        assert!(!uc.execute(&bundle.refresh_token).await.unwrap());

        let row = repo.refresh_token_by_value(&bundle.refresh_token).unwrap();
        assert!(!row.is_active);
    }

    #[tokio::test]
    async fn test_unknown_token_returns_false() {
        let (repo, _) = setup();
        let uc = SignOutUseCase::new(Arc::new(repo));
        assert!(!uc.execute("garbage").await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_leaves_other_sessions() {
        let (repo, config) = setup();
        let user = seed_user(&repo, "alice@example.com", "Passw0rd", UserRole::Patient).await;
        let sign_in = SignInUseCase::new(Arc::new(repo.clone()), Arc::new(repo.clone()), config);
        let first = sign_in.create_tokens(&user).await.unwrap();
        let second = sign_in.create_tokens(&user).await.unwrap();

        SignOutUseCase::new(Arc::new(repo.clone()))
            .execute(&first.refresh_token)
            .await
            .unwrap();

        assert!(!repo.refresh_token_by_value(&first.refresh_token).unwrap().is_active);
        assert!(repo.refresh_token_by_value(&second.refresh_token).unwrap().is_active);
    }

    #[tokio::test]
    async fn test_logout_revokes_expired_active_row() {
        let (repo, _) = setup();
        let user = seed_user(&repo, "alice@example.com", "Passw0rd", UserRole::Patient).await;
        let stale = RefreshToken::new(
            user.user_id,
            "stale-token".to_string(),
            Utc::now() - Duration::hours(1),
        );
        RefreshTokenRepository::create(&repo, &stale).await.unwrap();

        let uc = SignOutUseCase::new(Arc::new(repo.clone()));
        assert!(uc.execute("stale-token").await.unwrap());
        assert!(!repo.refresh_token_by_value("stale-token").unwrap().is_active);
        assert!(!uc.execute("stale-token").await.unwrap());
    }
}
