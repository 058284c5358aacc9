use std::borrow::Cow;

use crate::role::Role;

/// Path -> roles allowed to view it. Paths missing here are open to every role.
pub type RoutePermissionTable = &'static [(&'static str, &'static [Role])];

/// Role -> landing path.
pub type DefaultRouteTable = &'static [(Role, &'static str)];

/// Landing path used when a role has no entry in the default-route table.
pub const FALLBACK_ROUTE: &str = "/dashboard";

const SALON_ROUTE_PERMISSIONS: RoutePermissionTable = &[
    ("/superadmin-dashboard", &[Role::SuperAdmin]),
    ("/owner-manager", &[Role::SuperAdmin]),
    ("/subscription-management", &[Role::SuperAdmin]),
    ("/owner-dashboard", &[Role::Owner]),
    ("/salon-profile", &[Role::Owner]),
    ("/staff-management", &[Role::SuperAdmin, Role::Owner]),
    ("/appointments", &[Role::Owner, Role::Staff]),
    ("/staff-dashboard", &[Role::Staff]),
    ("/booking-management", &[Role::SuperAdmin, Role::Owner, Role::Staff]),
    ("/profile", &[Role::SuperAdmin, Role::Owner, Role::Staff]),
];

const SALON_DEFAULT_ROUTES: DefaultRouteTable = &[
    (Role::SuperAdmin, "/superadmin-dashboard"),
    (Role::Owner, "/owner-dashboard"),
    (Role::Staff, "/staff-dashboard"),
];

/// AccessPolicy
///
/// Pairs a route permission table with a default-route table and answers the
/// navigation layer's questions: may this role view this path, and where
/// should it land instead. Every method is a pure lookup over the static
/// tables; the caller passes the role in explicitly.
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy {
    permissions: RoutePermissionTable,
    defaults: DefaultRouteTable,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::salon()
    }
}

impl AccessPolicy {
    pub const fn new(permissions: RoutePermissionTable, defaults: DefaultRouteTable) -> Self {
        Self {
            permissions,
            defaults,
        }
    }

    /// The built-in policy for the salon dashboards.
    pub const fn salon() -> Self {
        Self::new(SALON_ROUTE_PERMISSIONS, SALON_DEFAULT_ROUTES)
    }

    /// has_access
    ///
    /// Returns whether `role` may view `route`. The lookup is case-insensitive
    /// and ignores query strings, fragments, percent-encoding, dot segments and
    /// a trailing slash. Routes absent from the table are permitted to every role.
    pub fn has_access(&self, route: &str, role: Role) -> bool {
        let key = route_key(route);
        match self
            .permissions
            .iter()
            .find(|(path, _)| path.eq_ignore_ascii_case(&key))
        {
            Some((_, allowed)) => allowed.contains(&role),
            None => true,
        }
    }

    /// default_route_for
    ///
    /// The landing path for `role`, or [`FALLBACK_ROUTE`] if the table has none.
    pub fn default_route_for(&self, role: Role) -> &'static str {
        self.defaults
            .iter()
            .find(|(r, _)| *r == role)
            .map_or(FALLBACK_ROUTE, |(_, path)| *path)
    }

    /// safe_redirect
    ///
    /// Decides between the requested page and the role's default route.
    /// A missing, blank or non-local request (anything not starting with a
    /// single `/`) is handled like no request at all.
    pub fn safe_redirect<'a>(&self, requested: Option<&'a str>, role: Role) -> &'a str {
        let Some(path) = requested else {
            return self.default_route_for(role);
        };

        if self.permits(path, role) {
            path
        } else {
            tracing::debug!(path, %role, "access denied, redirecting to default route");
            self.default_route_for(role)
        }
    }

    /// permits
    ///
    /// Whether `path` may be rendered for `role`: it must be an in-app path
    /// (a single leading `/`) and pass [`AccessPolicy::has_access`].
    pub fn permits(&self, path: &str, role: Role) -> bool {
        is_local_path(path) && self.has_access(path, role)
    }

    /// Listed routes `role` may view, in table order.
    pub fn routes_for(&self, role: Role) -> Vec<&'static str> {
        self.permissions
            .iter()
            .filter(|(_, allowed)| allowed.contains(&role))
            .map(|(path, _)| *path)
            .collect()
    }

    pub fn entries(&self) -> RoutePermissionTable {
        self.permissions
    }

    pub fn default_routes(&self) -> DefaultRouteTable {
        self.defaults
    }
}

/// Canonical lookup key: no query string or fragment, percent-escapes
/// decoded, empty and dot segments resolved, lower-cased.
fn route_key(route: &str) -> String {
    let path = route.split(['?', '#']).next().unwrap_or(route);
    let decoded = urlencoding::decode(path).unwrap_or(Cow::Borrowed(path));

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    format!("/{}", segments.join("/")).to_lowercase()
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\")
}

/// has_access against the built-in salon policy.
pub fn has_access(route: &str, role: Role) -> bool {
    AccessPolicy::salon().has_access(route, role)
}

/// default_route_for against the built-in salon policy.
pub fn default_route_for(role: Role) -> &'static str {
    AccessPolicy::salon().default_route_for(role)
}

/// safe_redirect against the built-in salon policy.
pub fn safe_redirect(requested: Option<&str>, role: Role) -> &str {
    AccessPolicy::salon().safe_redirect(requested, role)
}
