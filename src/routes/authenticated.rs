use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Routes used by the dashboard's navigation guard. Every handler receives the
/// validated `AuthUser` and passes its normalized role to the access policy.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /me
        // The caller's canonical role and landing route.
        .route("/me", get(handlers::get_me))
        // GET /access/check?path=...
        // Page-guard decision for one path.
        .route("/access/check", get(handlers::check_access))
        // GET /navigation/redirect?next=...
        // 307 to `next` if permitted, otherwise to the role's default route.
        .route("/navigation/redirect", get(handlers::redirect))
        // GET /navigation/routes
        // Guarded routes visible to the caller, for the sidebar.
        .route("/navigation/routes", get(handlers::get_my_routes))
}
