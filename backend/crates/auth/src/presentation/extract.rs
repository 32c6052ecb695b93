//! Request Extractors

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;

use crate::application::access_guard::Principal;
use crate::error::AuthError;

/// `Json` whose rejections render as the 422 error envelope
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AuthError))]
pub struct AppJson<T>(pub T);

/// Principal placed in the request extensions by
/// [`require_access_token`](super::middleware::require_access_token).
///
/// Rejects with 401 on routes that are not behind the middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AuthError::Unauthorized)
    }
}
