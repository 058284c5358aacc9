use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::role::Role;

// --- Query Parameters ---

/// AccessQuery
///
/// Query parameters for GET /access/check.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AccessQuery {
    /// The navigable path the client wants to render.
    #[param(example = "/owner-manager")]
    pub path: String,
}

/// RedirectQuery
///
/// Query parameters for GET /navigation/redirect.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct RedirectQuery {
    /// The page requested before login, if any.
    pub next: Option<String>,
}

// --- Response Schemas ---

/// UserProfile
///
/// Output schema for the authenticated user's session (GET /me).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UserProfile {
    pub id: Uuid,
    pub role: Role,
    /// The role in the snake-case form used by permission grants.
    pub permission_key: String,
    /// Where the dashboard should land after login.
    pub default_route: String,
    #[ts(type = "string | null")]
    pub session_expires_at: Option<DateTime<Utc>>,
}

/// AccessDecision
///
/// Output schema for GET /access/check. `allowed` holds only for in-app paths
/// the role may view; `redirect_to` is then the requested path, otherwise the
/// role's default route.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AccessDecision {
    pub path: String,
    pub role: Role,
    pub allowed: bool,
    pub redirect_to: String,
}

/// ResolvedRole
///
/// Output schema for POST /roles/resolve.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ResolvedRole {
    pub role: Role,
    pub permission_key: String,
    pub default_route: String,
}

/// DefaultRoute
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct DefaultRoute {
    pub role: Role,
    pub path: String,
}

/// RoutePermission
///
/// One row of the route permission table (GET /admin/permissions).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RoutePermission {
    pub path: String,
    pub roles: Vec<Role>,
}
