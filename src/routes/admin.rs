use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// Nested under `/admin`. Authentication happens in the `AuthUser` extractor;
/// the `SuperAdmin` check happens inside each handler.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/permissions
        // The full route permission table, for auditing.
        .route("/permissions", get(handlers::get_permissions))
}
