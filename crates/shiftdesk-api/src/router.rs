//! Route definitions for the ShiftDesk HTTP API.
//!
//! All routes are mounted under `/api/v1`. Public routes (health, login,
//! refresh) run without the authenticator; everything else requires a
//! valid access token, and admin routes additionally require the root level.

use axum::{
    Router,
    extract::Request,
    middleware::{self as axum_middleware, Next},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use shiftdesk_entity::user::ROOT_LEVEL;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let authenticated = Router::new()
        .merge(session_routes())
        .merge(admin_routes())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::authenticate,
        ));

    let api_routes = Router::new()
        .merge(public_routes())
        .merge(authenticated);

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Endpoints reachable without an access token
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
}

/// Endpoints for any authenticated caller
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/me", get(handlers::user::me))
}

/// Root-level administration
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/users/{id}/sessions",
            get(handlers::admin::list_sessions),
        )
        .route(
            "/admin/users/{id}/sessions/revoke",
            post(handlers::admin::revoke_sessions),
        )
        .route_layer(axum_middleware::from_fn(|req: Request, next: Next| {
            middleware::guard::require_level(ROOT_LEVEL, req, next)
        }))
}
