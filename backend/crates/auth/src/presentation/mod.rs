//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors, middleware and router.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use extract::{AppJson, CurrentUser};
pub use handlers::{AuthAppState, AuthRepositories};
pub use middleware::{bearer_token, require_access_token};
pub use router::{api_router, api_router_generic};
