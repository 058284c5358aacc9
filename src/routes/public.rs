use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints needed before a session exists: monitoring, the landing-route
/// lookup used by the login page, and role resolution.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Load balancer check.
        .route("/health", get(|| async { "ok" }))
        // GET /navigation/defaults
        // Landing path per role.
        .route("/navigation/defaults", get(handlers::get_default_routes))
        // POST /roles/resolve
        // Normalizes an arbitrary role payload to its canonical role.
        .route("/roles/resolve", post(handlers::resolve_role))
}
