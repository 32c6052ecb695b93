//! Full Name Value Object

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const FULL_NAME_MIN_LENGTH: usize = 2;
/// Width of `users.full_name`
const FULL_NAME_MAX_LENGTH: usize = 150;

/// A person's display name, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullName(String);

impl FullName {
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into().trim().to_string();
        let len = name.chars().count();

        if len < FULL_NAME_MIN_LENGTH {
            return Err(AppError::unprocessable(format!(
                "Full name must be at least {} characters",
                FULL_NAME_MIN_LENGTH
            )));
        }
        if len > FULL_NAME_MAX_LENGTH {
            return Err(AppError::unprocessable(format!(
                "Full name must be at most {} characters",
                FULL_NAME_MAX_LENGTH
            )));
        }

        Ok(Self(name))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FullName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_trimmed() {
        let name = FullName::new("  Alice Liddell ").unwrap();
        assert_eq!(name.as_str(), "Alice Liddell");
    }

    #[test]
    fn test_full_name_bounds() {
        assert!(FullName::new(" a ").is_err());
        assert!(FullName::new("Al").is_ok());
        assert!(FullName::new("x".repeat(151)).is_err());
        assert!(FullName::new("x".repeat(150)).is_ok());
    }
}
