//! User Entity
//!
//! Identity record for patients, doctors and administrators.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::value_object::{
    email::Email, full_name::FullName, user_id::UserId, user_password::UserPassword,
    user_role::UserRole,
};

/// User entity
///
/// The role is fixed at creation. Users are never hard-deleted; access is
/// withdrawn by clearing `is_active`.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub full_name: FullName,
    /// Login identifier, unique across all users
    pub email: Email,
    pub password_hash: UserPassword,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub user_role: UserRole,
    pub is_active: bool,
    /// Last successful login
    pub last_access_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user
    pub fn new(
        full_name: FullName,
        email: Email,
        password_hash: UserPassword,
        user_role: UserRole,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            full_name,
            email,
            password_hash,
            phone: None,
            date_of_birth: None,
            user_role,
            is_active: true,
            last_access_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
        self
    }

    pub fn with_date_of_birth(mut self, date_of_birth: Option<NaiveDate>) -> Self {
        self.date_of_birth = date_of_birth;
        self
    }

    /// Record successful login
    pub fn record_access(&mut self, at: DateTime<Utc>) {
        self.last_access_at = Some(at);
        self.updated_at = at;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    /// Check if user can login
    pub fn can_login(&self) -> bool {
        self.is_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User::new(
            FullName::new("Alice Liddell").unwrap(),
            Email::new("alice@example.com").unwrap(),
            UserPassword::from_db("$argon2id$stub"),
            UserRole::Patient,
        )
    }

    #[test]
    fn test_new_user_is_active_without_access() {
        let user = sample();
        assert!(user.can_login());
        assert!(user.last_access_at.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_deactivate_blocks_login() {
        let mut user = sample();
        user.deactivate();
        assert!(!user.can_login());

        user.activate();
        assert!(user.can_login());
    }

    #[test]
    fn test_record_access() {
        let mut user = sample();
        let at = Utc::now();
        user.record_access(at);
        assert_eq!(user.last_access_at, Some(at));
        assert_eq!(user.updated_at, at);
    }

    #[test]
    fn test_blank_phone_is_dropped() {
        let user = sample().with_phone(Some("   ".to_string()));
        assert!(user.phone.is_none());

        let user = sample().with_phone(Some(" 555-0100 ".to_string()));
        assert_eq!(user.phone.as_deref(), Some("555-0100"));
    }
}
