//! API routes.
//!
//! Everything lives under `/api`. CORS is wide open — the two web
//! clients are served from different origins — and every request is
//! traced.

pub mod analytics;
pub mod auth;
pub mod tickets;
pub mod users;

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/tickets", get(tickets::list).post(tickets::create))
        .route("/api/tickets/{id}", put(tickets::update))
        .route("/api/tickets/{id}/comments", post(tickets::add_comment))
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/{id}", delete(users::remove))
        .route("/api/analytics", get(analytics::report))
        .route(
            "/api/analytics/tickets-over-time",
            get(analytics::tickets_over_time),
        )
        .route(
            "/api/analytics/agent-performance",
            get(analytics::agent_performance),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
