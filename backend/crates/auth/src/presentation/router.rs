//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState, AuthRepositories};
use crate::presentation::middleware::require_access_token;

/// `/auth` and `/users` backed by PostgreSQL
pub fn api_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    api_router_generic(repo, config)
}

/// `/auth` and `/users` for any repository implementation, sharing one state
pub fn api_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: AuthRepositories,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .nest("/auth", auth_routes(state.clone()))
        .nest("/users", users_routes(state))
}

fn auth_routes<R>(state: AuthAppState<R>) -> Router
where
    R: AuthRepositories,
{
    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route("/profile", get(handlers::me))
        .route("/register/doctor", post(handlers::register_doctor::<R>))
        .route("/registro/doctor", post(handlers::register_doctor::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_access_token::<R>,
        ));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/registro", post(handlers::register::<R>))
        .route("/registro/paciente", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/refresh", post(handlers::refresh::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .merge(protected)
        .with_state(state)
}

fn users_routes<R>(state: AuthAppState<R>) -> Router
where
    R: AuthRepositories,
{
    Router::new()
        .route("/", get(handlers::list_users::<R>))
        .route("/{id}/active", patch(handlers::set_user_active::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_access_token::<R>,
        ))
        .with_state(state)
}
