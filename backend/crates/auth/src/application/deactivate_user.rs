//! Deactivate User Use Case
//!
//! Administrator toggle for `users.active`. A deactivated user can no
//! longer sign in, their outstanding access tokens stop resolving and
//! their refresh tokens are burned on next use.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

pub struct DeactivateUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> DeactivateUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(
        &self,
        acting_user: &UserId,
        target: &UserId,
        is_active: bool,
    ) -> AuthResult<User> {
        if acting_user == target && !is_active {
            return Err(AuthError::Validation(
                "Administrators cannot deactivate themselves".to_string(),
            ));
        }

        let user = self
            .user_repo
            .set_active(target, is_active)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(
            user_id = %target,
            acting_user = %acting_user,
            is_active,
            "User active flag changed"
        );

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sign_in::{SignInInput, SignInUseCase};
    use crate::application::test_support::{seed_user, setup};
    use crate::domain::value_object::user_role::UserRole;

    #[tokio::test]
    async fn test_deactivated_user_cannot_sign_in() {
        let (repo, config) = setup();
        let admin = seed_user(&repo, "admin@example.com", "Adm1nPass", UserRole::Administrator).await;
        let alice = seed_user(&repo, "alice@example.com", "Passw0rd", UserRole::Patient).await;

        let user = DeactivateUserUseCase::new(Arc::new(repo.clone()))
            .execute(&admin.user_id, &alice.user_id, false)
            .await
            .unwrap();
        assert!(!user.is_active);

        let err = SignInUseCase::new(Arc::new(repo.clone()), Arc::new(repo), config)
            .execute(SignInInput {
                email: "alice@example.com".to_string(),
                password: "Passw0rd".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_unknown_target() {
        let (repo, _) = setup();
        let err = DeactivateUserUseCase::new(Arc::new(repo))
            .execute(&UserId::new(), &UserId::new(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_cannot_deactivate_self() {
        let (repo, _) = setup();
        let admin = seed_user(&repo, "admin@example.com", "Adm1nPass", UserRole::Administrator).await;
        let err = DeactivateUserUseCase::new(Arc::new(repo))
            .execute(&admin.user_id, &admin.user_id, false)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }
}
