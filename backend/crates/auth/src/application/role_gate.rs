//! Role Gate
//!
//! Pure check layered on top of [`AccessGuard`](super::access_guard::AccessGuard):
//! authentication and role membership are decided separately.

use crate::application::access_guard::Principal;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Allowed role set for an endpoint
#[derive(Debug, Clone, Copy)]
pub struct RoleGate {
    allowed: &'static [UserRole],
}

impl RoleGate {
    pub const ADMINISTRATOR: RoleGate = RoleGate::new(&[UserRole::Administrator]);

    pub const fn new(allowed: &'static [UserRole]) -> Self {
        Self { allowed }
    }

    /// Pass the principal through unchanged or fail with `Forbidden`
    pub fn check<'a>(&self, principal: &'a Principal) -> AuthResult<&'a Principal> {
        require_role(principal, self.allowed)
    }
}

pub fn require_role<'a>(principal: &'a Principal, allowed: &[UserRole]) -> AuthResult<&'a Principal> {
    if allowed.contains(&principal.role()) {
        Ok(principal)
    } else {
        tracing::debug!(
            user_id = %principal.user_id(),
            role = %principal.role(),
            "Role not allowed"
        );
        Err(AuthError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::user::User;
    use crate::domain::value_object::{
        email::Email, full_name::FullName, user_password::UserPassword,
    };

    fn principal(role: UserRole) -> Principal {
        Principal {
            user: User::new(
                FullName::new("Test User").unwrap(),
                Email::new("t@example.com").unwrap(),
                UserPassword::from_db("x"),
                role,
            ),
        }
    }

    #[test]
    fn test_patient_forbidden_from_admin_gate() {
        let patient = principal(UserRole::Patient);
        assert!(matches!(
            RoleGate::ADMINISTRATOR.check(&patient),
            Err(AuthError::Forbidden)
        ));
    }

    #[test]
    fn test_admin_passes_through_unchanged() {
        let admin = principal(UserRole::Administrator);
        let passed = RoleGate::ADMINISTRATOR.check(&admin).unwrap();
        assert_eq!(passed.user_id(), admin.user_id());
    }

    #[test]
    fn test_admin_gate_allows_only_administrators() {
        for role in UserRole::ALL {
            let passed = RoleGate::ADMINISTRATOR.check(&principal(role)).is_ok();
            assert_eq!(passed, role == UserRole::Administrator);
        }
    }

    #[test]
    fn test_empty_set_forbids_everyone() {
        let admin = principal(UserRole::Administrator);
        assert!(require_role(&admin, &[]).is_err());
    }
}
