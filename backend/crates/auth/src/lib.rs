//! Auth (Authentication & Authorization) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration of patients (public) and doctors (administrators only)
//! - Email + password login issuing an access/refresh JWT pair
//! - Refresh token exchange and revocation (logout)
//! - Bearer access guard and role gate for protected routes
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, strength policy enforced at registration
//! - Access tokens are short-lived (30 min) and carry the role
//! - Refresh tokens are long-lived (30 days), persisted and revocable
//! - Every protected request re-checks that the user is still active

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::router::{api_router, api_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
