//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use std::str::FromStr;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    DeactivateUserUseCase, RefreshUseCase, RegisterInput, RegisterUseCase, RoleGate,
    SignInInput, SignInUseCase, SignOutUseCase,
};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ListUsersQuery, LoginRequest, MessageResponse, RefreshTokenRequest, RegisterRequest,
    SetActiveRequest, TokenResponse, UserResponse,
};
use crate::presentation::extract::{AppJson, CurrentUser};

/// Repository bounds shared by every auth handler
pub trait AuthRepositories:
    UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static
{
}

impl<R> AuthRepositories for R where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static
{
}

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AuthRepositories,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: AuthRepositories,
{
    create_user(&state, req, UserRole::Patient).await
}

/// POST /auth/register/doctor (administrators only)
pub async fn register_doctor<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(principal): CurrentUser,
    AppJson(req): AppJson<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: AuthRepositories,
{
    RoleGate::ADMINISTRATOR.check(&principal)?;
    create_user(&state, req, UserRole::Doctor).await
}

async fn create_user<R>(
    state: &AuthAppState<R>,
    req: RegisterRequest,
    role: UserRole,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: AuthRepositories,
{
    let use_case = RegisterUseCase::new(state.repo.clone());

    let user = use_case
        .execute(RegisterInput {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
            phone: req.phone,
            date_of_birth: req.date_of_birth,
            role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

// ============================================================================
// Sessions
// ============================================================================

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<LoginRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: AuthRepositories,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let bundle = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(bundle.into()))
}

/// POST /auth/refresh
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<RefreshTokenRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: AuthRepositories,
{
    let use_case =
        RefreshUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let bundle = use_case.execute(&req.refresh_token).await?;

    Ok(Json(bundle.into()))
}

/// POST /auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<RefreshTokenRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthRepositories,
{
    let use_case = SignOutUseCase::new(state.repo.clone());

    if !use_case.execute(&req.refresh_token).await? {
        return Err(AuthError::RefreshTokenNotFound);
    }

    Ok(Json(MessageResponse {
        message: "Successfully logged out".to_string(),
    }))
}

/// GET /auth/me
pub async fn me(CurrentUser(principal): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(&principal.user))
}

// ============================================================================
// User administration
// ============================================================================

/// GET /users
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(principal): CurrentUser,
    Query(query): Query<ListUsersQuery>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: AuthRepositories,
{
    RoleGate::ADMINISTRATOR.check(&principal)?;

    let (offset, limit) = query.page();
    let users = UserRepository::list(state.repo.as_ref(), offset, limit).await?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// PATCH /users/{id}/active
pub async fn set_user_active<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<String>,
    AppJson(req): AppJson<SetActiveRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: AuthRepositories,
{
    RoleGate::ADMINISTRATOR.check(&principal)?;

    let target =
        UserId::from_str(&id).map_err(|_| AuthError::Validation("Invalid user id".to_string()))?;

    let use_case = DeactivateUserUseCase::new(state.repo.clone());
    let user = use_case
        .execute(&principal.user_id(), &target, req.active)
        .await?;

    Ok(Json(UserResponse::from(&user)))
}
