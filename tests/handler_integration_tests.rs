use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use salon_portal::{
    AppConfig, AppState, create_router,
    models::{AccessDecision, DefaultRoute, ResolvedRole, RoutePermission, UserProfile},
    role::Role,
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;
use uuid::Uuid;

// --- Helpers ---

fn app() -> Router {
    // Default config is Env::Local, so the header bypass is active.
    create_router(AppState::new(AppConfig::default()))
}

fn get_as(uri: &str, role: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-user-id", Uuid::from_u128(7).to_string())
        .header("x-user-role", role)
        .body(Body::empty())
        .unwrap()
}

async fn json_body<T: DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// --- Tests ---

#[tokio::test]
async fn test_health_is_public() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_authenticated_routes_require_identity() {
    for uri in ["/me", "/access/check?path=/profile", "/navigation/routes"] {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn test_get_me() {
    let response = app().oneshot(get_as("/me", "salon_owner")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let profile: UserProfile = json_body(response).await;
    assert_eq!(profile.id, Uuid::from_u128(7));
    assert_eq!(profile.role, Role::Owner);
    assert_eq!(profile.permission_key, "owner");
    assert_eq!(profile.default_route, "/owner-dashboard");
    assert!(profile.session_expires_at.is_none());
}

#[tokio::test]
async fn test_check_access_denied() {
    let response = app()
        .oneshot(get_as("/access/check?path=/owner-manager", "owner"))
        .await
        .unwrap();
    let decision: AccessDecision = json_body(response).await;

    assert!(!decision.allowed);
    assert_eq!(decision.path, "/owner-manager");
    assert_eq!(decision.redirect_to, "/owner-dashboard");
}

#[tokio::test]
async fn test_check_access_granted() {
    let response = app()
        .oneshot(get_as("/access/check?path=/owner-manager", "admin"))
        .await
        .unwrap();
    let decision: AccessDecision = json_body(response).await;

    assert!(decision.allowed);
    assert_eq!(decision.role, Role::SuperAdmin);
    assert_eq!(decision.redirect_to, "/owner-manager");
}

#[tokio::test]
async fn test_check_access_non_local_path_is_not_allowed() {
    for uri in [
        "/access/check?path=https://evil.example",
        "/access/check?path=//evil.example",
        "/access/check?path=owner-dashboard",
        "/access/check?path=",
    ] {
        let response = app().oneshot(get_as(uri, "staff")).await.unwrap();
        let decision: AccessDecision = json_body(response).await;

        assert!(!decision.allowed, "{uri}");
        assert_eq!(decision.redirect_to, "/staff-dashboard", "{uri}");
    }
}

#[tokio::test]
async fn test_check_access_uppercase_path_denied() {
    let response = app()
        .oneshot(get_as("/access/check?path=/OWNER-MANAGER", "staff"))
        .await
        .unwrap();
    let decision: AccessDecision = json_body(response).await;

    assert!(!decision.allowed);
    assert_eq!(decision.redirect_to, "/staff-dashboard");
}

#[tokio::test]
async fn test_redirect_to_permitted_page() {
    let response = app()
        .oneshot(get_as("/navigation/redirect?next=/booking-management", "staff"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/booking-management"
    );
}

#[tokio::test]
async fn test_redirect_denied_and_missing_next() {
    for uri in [
        "/navigation/redirect?next=/owner-manager",
        "/navigation/redirect",
        "/navigation/redirect?next=https://evil.example",
    ] {
        let response = app().oneshot(get_as(uri, "employee")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/staff-dashboard",
            "{uri}"
        );
    }
}

#[tokio::test]
async fn test_my_routes() {
    let response = app().oneshot(get_as("/navigation/routes", "owner")).await.unwrap();
    let routes: Vec<String> = json_body(response).await;

    assert!(routes.contains(&"/owner-dashboard".to_string()));
    assert!(routes.contains(&"/staff-management".to_string()));
    assert!(!routes.contains(&"/owner-manager".to_string()));
}

#[tokio::test]
async fn test_default_routes_are_public() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/navigation/defaults")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let defaults: Vec<DefaultRoute> = json_body(response).await;

    assert_eq!(defaults.len(), 3);
    assert!(
        defaults
            .iter()
            .any(|d| d.role == Role::Staff && d.path == "/staff-dashboard")
    );
}

#[tokio::test]
async fn test_resolve_role() {
    let request = Request::builder()
        .method("POST")
        .uri("/roles/resolve")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"type":" SuperAdmin "}"#))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let resolved: ResolvedRole = json_body(response).await;
    assert_eq!(resolved.role, Role::SuperAdmin);
    assert_eq!(resolved.permission_key, "super_admin");
    assert_eq!(resolved.default_route, "/superadmin-dashboard");
}

#[tokio::test]
async fn test_admin_permissions_forbidden_for_owner() {
    let response = app()
        .oneshot(get_as("/admin/permissions", "owner"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_permissions_unauthenticated() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/admin/permissions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_permissions_for_super_admin() {
    let response = app()
        .oneshot(get_as("/admin/permissions", "super_admin"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let table: Vec<RoutePermission> = json_body(response).await;
    let owner_manager = table
        .iter()
        .find(|entry| entry.path == "/owner-manager")
        .unwrap();
    assert_eq!(owner_manager.roles, vec![Role::SuperAdmin]);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
