//! Application Layer
//!
//! Use cases and application services.

pub mod access_guard;
pub mod config;
pub mod deactivate_user;
pub mod refresh;
pub mod register;
pub mod role_gate;
pub mod sign_in;
pub mod sign_out;
pub mod token_codec;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use access_guard::{AccessGuard, Principal};
pub use config::AuthConfig;
pub use deactivate_user::DeactivateUserUseCase;
pub use refresh::RefreshUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use role_gate::{RoleGate, require_role};
pub use sign_in::{SignInInput, SignInUseCase, TokenBundle};
pub use sign_out::SignOutUseCase;
pub use token_codec::{IssuedToken, TokenClaims, TokenCodec, TokenError};
