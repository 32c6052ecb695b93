use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role. Fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum UserRole {
    #[default]
    Patient = 0,
    Doctor = 1,
    Administrator = 2,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Patient, UserRole::Doctor, UserRole::Administrator];

    /// Numeric id for database storage
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// Wire code, as carried in the `role` claim and API responses
    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Patient => "Patient",
            Doctor => "Doctor",
            Administrator => "Administrator",
        }
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.id() == id)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
