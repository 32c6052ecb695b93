//! Register Use Case
//!
//! Creates a new user account with a hashed password.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    full_name::FullName,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Width of `users.phone`
const PHONE_MAX_LENGTH: usize = 20;

/// Register input
pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Patient on the public path, Doctor on the administrator path
    pub role: UserRole,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        let full_name = FullName::new(input.full_name)?;
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        let phone_len = input.phone.as_deref().map_or(0, |p| p.trim().chars().count());
        if phone_len > PHONE_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Phone must be at most {PHONE_MAX_LENGTH} characters"
            )));
        }

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = UserPassword::from_raw(&raw_password)?;

        let user = User::new(full_name, email, password_hash, input.role)
            .with_phone(input.phone)
            .with_date_of_birth(input.date_of_birth);

        // A concurrent registration may still win the race; the store
        // reports that as DuplicateEmail too.
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.user_role,
            "User registered"
        );

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::MemoryAuthRepository;

    fn use_case(repo: &MemoryAuthRepository) -> RegisterUseCase<MemoryAuthRepository> {
        RegisterUseCase::new(Arc::new(repo.clone()))
    }

    fn input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            full_name: "Alice Liddell".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone: None,
            date_of_birth: None,
            role: UserRole::Patient,
        }
    }

    #[tokio::test]
    async fn test_register_creates_active_patient() {
        let repo = MemoryAuthRepository::new();
        let user = use_case(&repo)
            .execute(input("alice@example.com", "Passw0rd"))
            .await
            .unwrap();

        assert!(user.is_active);
        assert_eq!(user.user_role, UserRole::Patient);
        assert_ne!(user.password_hash.as_str(), "Passw0rd");

        let stored = repo.find_by_email(&user.email).await.unwrap().unwrap();
        assert_eq!(stored.user_id, user.user_id);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = MemoryAuthRepository::new();
        let uc = use_case(&repo);

        uc.execute(input("alice@example.com", "Passw0rd")).await.unwrap();
        let err = uc
            .execute(input("alice@example.com", "Other1pass"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_email_is_case_sensitive() {
        let repo = MemoryAuthRepository::new();
        let uc = use_case(&repo);

        uc.execute(input("alice@example.com", "Passw0rd")).await.unwrap();
        assert!(uc.execute(input("Alice@example.com", "Passw0rd")).await.is_ok());
    }

    #[tokio::test]
    async fn test_weak_password_rejected_before_lookup() {
        let repo = MemoryAuthRepository::new();
        let err = use_case(&repo)
            .execute(input("bob@example.com", "abcdefg1"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::WeakPassword(_)));
        assert!(err.to_string().contains("uppercase"));
    }

    #[tokio::test]
    async fn test_invalid_name_and_email() {
        let repo = MemoryAuthRepository::new();
        let uc = use_case(&repo);

        let mut bad_name = input("carol@example.com", "Passw0rd");
        bad_name.full_name = " A ".to_string();
        assert!(matches!(uc.execute(bad_name).await, Err(AuthError::Validation(_))));

        let bad_email = input("not-an-email", "Passw0rd");
        assert!(matches!(uc.execute(bad_email).await, Err(AuthError::Validation(_))));
    }
}
