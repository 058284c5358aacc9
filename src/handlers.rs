use crate::{
    AppState,
    auth::AuthUser,
    models::{
        AccessDecision, AccessQuery, DefaultRoute, RedirectQuery, ResolvedRole, RoutePermission,
        UserProfile,
    },
    role::{self, Role},
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
};
use serde_json::Value;

// --- Handlers ---

/// get_me
///
/// [Authenticated Route] Returns the caller's session: canonical role in both
/// casings and the dashboard they should land on.
#[utoipa::path(
    get,
    path = "/me",
    responses((status = 200, description = "Profile", body = UserProfile))
)]
pub async fn get_me(
    AuthUser {
        id,
        role,
        expires_at,
    }: AuthUser,
    State(state): State<AppState>,
) -> Json<UserProfile> {
    Json(UserProfile {
        id,
        role,
        permission_key: role.as_permission_key().to_string(),
        default_route: state.policy.default_route_for(role).to_string(),
        session_expires_at: expires_at,
    })
}

/// check_access
///
/// [Authenticated Route] Page-guard check for a single path.
#[utoipa::path(
    get,
    path = "/access/check",
    params(AccessQuery),
    responses((status = 200, description = "Decision", body = AccessDecision))
)]
pub async fn check_access(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<AccessQuery>,
) -> Json<AccessDecision> {
    let allowed = state.policy.permits(&query.path, role);
    let redirect_to = state.policy.safe_redirect(Some(query.path.as_str()), role).to_string();

    Json(AccessDecision {
        path: query.path,
        role,
        allowed,
        redirect_to,
    })
}

/// redirect
///
/// [Authenticated Route] Sends the browser to `next` when the caller may view
/// it, otherwise to their default route. Never redirects off-site.
#[utoipa::path(
    get,
    path = "/navigation/redirect",
    params(RedirectQuery),
    responses((status = 307, description = "Redirect to the safe destination"))
)]
pub async fn redirect(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<RedirectQuery>,
) -> Redirect {
    Redirect::temporary(state.policy.safe_redirect(query.next.as_deref(), role))
}

/// get_my_routes
///
/// [Authenticated Route] Lists the guarded routes the caller may open, for
/// building the dashboard navigation menu.
#[utoipa::path(
    get,
    path = "/navigation/routes",
    responses((status = 200, description = "Routes", body = [String]))
)]
pub async fn get_my_routes(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
) -> Json<Vec<String>> {
    Json(
        state
            .policy
            .routes_for(role)
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}

/// get_default_routes
///
/// [Public Route] The landing path of every role.
#[utoipa::path(
    get,
    path = "/navigation/defaults",
    responses((status = 200, description = "Default routes", body = [DefaultRoute]))
)]
pub async fn get_default_routes(State(state): State<AppState>) -> Json<Vec<DefaultRoute>> {
    Json(
        Role::ALL
            .into_iter()
            .map(|role| DefaultRoute {
                role,
                path: state.policy.default_route_for(role).to_string(),
            })
            .collect(),
    )
}

/// resolve_role
///
/// [Public Route] Normalizes an arbitrary role payload (string, array or
/// object) the same way sessions are normalized.
#[utoipa::path(
    post,
    path = "/roles/resolve",
    request_body = serde_json::Value,
    responses((status = 200, description = "Canonical role", body = ResolvedRole))
)]
pub async fn resolve_role(
    State(state): State<AppState>,
    Json(raw): Json<Value>,
) -> Json<ResolvedRole> {
    let role = role::normalize(&raw);
    Json(ResolvedRole {
        role,
        permission_key: role.as_permission_key().to_string(),
        default_route: state.policy.default_route_for(role).to_string(),
    })
}

/// get_permissions
///
/// [Admin Route] Dumps the route permission table.
///
/// *Authorization*: Explicitly checks that the resolved role is `SuperAdmin`.
#[utoipa::path(
    get,
    path = "/admin/permissions",
    responses(
        (status = 200, description = "Permission table", body = [RoutePermission]),
        (status = 403, description = "Not a super admin")
    )
)]
pub async fn get_permissions(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<RoutePermission>>, StatusCode> {
    if role != Role::SuperAdmin {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(Json(
        state
            .policy
            .entries()
            .iter()
            .map(|(path, roles)| RoutePermission {
                path: path.to_string(),
                roles: roles.to_vec(),
            })
            .collect(),
    ))
}
