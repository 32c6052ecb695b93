//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordPolicyError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration with an email that is already taken
    #[error("Email is already registered")]
    DuplicateEmail,

    /// Password fails the strength policy
    #[error("{0}")]
    WeakPassword(#[from] PasswordPolicyError),

    /// Malformed input (name, email, body fields)
    #[error("{0}")]
    Validation(String),

    /// Unknown email, wrong password or inactive account
    #[error("Incorrect email or password")]
    AuthenticationFailed,

    /// Refresh token unknown, revoked, expired or malformed
    #[error("Invalid or expired refresh token")]
    InvalidOrExpiredToken,

    /// Refresh token owner is missing or inactive
    #[error("Invalid user")]
    InvalidUser,

    /// Missing, malformed or stale access token
    #[error("Could not validate credentials")]
    Unauthorized,

    /// Authenticated but the role is not allowed
    #[error("Insufficient permissions")]
    Forbidden,

    /// Logout with a token that is not active
    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("User not found")]
    UserNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::DuplicateEmail | AuthError::RefreshTokenNotFound => StatusCode::BAD_REQUEST,
            AuthError::WeakPassword(_) | AuthError::Validation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AuthError::AuthenticationFailed
            | AuthError::InvalidOrExpiredToken
            | AuthError::InvalidUser
            | AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::DuplicateEmail | AuthError::RefreshTokenNotFound => ErrorKind::BadRequest,
            AuthError::WeakPassword(_) | AuthError::Validation(_) => ErrorKind::UnprocessableEntity,
            AuthError::AuthenticationFailed
            | AuthError::InvalidOrExpiredToken
            | AuthError::InvalidUser
            | AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Bearer challenge is sent with every 401
    fn wants_challenge(&self) -> bool {
        self.status_code() == StatusCode::UNAUTHORIZED
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::AuthenticationFailed => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidOrExpiredToken | AuthError::InvalidUser => {
                tracing::warn!(error = %self, "Refresh rejected");
            }
            AuthError::Forbidden => {
                tracing::warn!("Role check failed");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let challenge = self.wants_challenge();
        let mut response = self.to_app_error().into_response();
        if challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Value objects report malformed input as 422 `AppError`s.
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::UnprocessableEntity | ErrorKind::BadRequest => {
                AuthError::Validation(err.message().to_string())
            }
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

/// Malformed or incomplete request bodies
impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::Validation(rejection.body_text())
    }
}
