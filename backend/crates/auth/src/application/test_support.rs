//! Fixtures shared by the use case tests.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    full_name::FullName,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::infra::memory::MemoryAuthRepository;

pub(crate) fn setup() -> (MemoryAuthRepository, Arc<AuthConfig>) {
    (
        MemoryAuthRepository::new(),
        Arc::new(AuthConfig::new("use-case-test-secret")),
    )
}

pub(crate) async fn seed_user(
    repo: &MemoryAuthRepository,
    email: &str,
    password: &str,
    role: UserRole,
) -> User {
    let raw = RawPassword::new(password.to_string()).unwrap();
    let user = User::new(
        FullName::new("Test User").unwrap(),
        Email::new(email).unwrap(),
        UserPassword::from_raw(&raw).unwrap(),
        role,
    );
    UserRepository::create(repo, &user).await.unwrap();
    user
}
