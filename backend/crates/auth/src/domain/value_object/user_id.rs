//! Identifiers owned by the auth domain

pub use kernel::id::{RefreshTokenId, UserId};
