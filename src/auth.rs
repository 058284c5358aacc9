use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    role::{self, Role},
};

/// Header carrying the user id for the local development bypass.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the raw role for the local development bypass.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Claims
///
/// Payload expected inside the bearer token issued by the auth backend.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the user's UUID.
    pub sub: Uuid,
    /// Expiration Time (exp), seconds since the epoch.
    pub exp: usize,
    /// Issued At (iat).
    pub iat: usize,
    /// Raw role as the backend stores it. May be a string, an array or an
    /// object; it is normalized before use. Absent means least privilege.
    #[serde(default)]
    pub role: Value,
}

/// AuthUser
///
/// The session context of an authenticated request. Handlers receive it as an
/// argument and pass `role` explicitly to the access policy.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    /// Already normalized.
    pub role: Role,
    /// Token expiry. `None` for the local bypass.
    pub expires_at: Option<DateTime<Utc>>,
}

/// AuthUser Extractor Implementation
///
/// Resolution order:
/// 1. Local Bypass: in `Env::Local`, `x-user-id` (plus optional `x-user-role`)
///    is accepted without a token.
/// 2. Token Validation: `Authorization: Bearer <jwt>`, signature and `exp` checked.
/// 3. Role Normalization: the `role` claim is resolved to a canonical [`Role`].
///
/// Rejection: `StatusCode::UNAUTHORIZED` on any failure.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // 1. Dependency Resolution
        let config = AppConfig::from_ref(state);

        // 2. Local Development Bypass Check
        if config.env == Env::Local {
            if let Some(user) = local_bypass(parts) {
                return Ok(user);
            }
        }
        // Production, or the bypass headers were absent/invalid: fall through to JWT.

        // 3. Token Extraction
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(StatusCode::UNAUTHORIZED)?;

        // 4. Decode and Validate the Token
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => tracing::debug!("rejected expired token"),
                other => tracing::debug!(error = ?other, "rejected invalid token"),
            }
            StatusCode::UNAUTHORIZED
        })?;

        // 5. Role Normalization
        // Whatever shape the backend stored, the session carries a canonical role.
        let claims = token_data.claims;
        Ok(AuthUser {
            id: claims.sub,
            role: role::normalize(&claims.role),
            expires_at: i64::try_from(claims.exp)
                .ok()
                .and_then(|exp| DateTime::from_timestamp(exp, 0)),
        })
    }
}

/// Resolves the development identity from the bypass headers, if present.
fn local_bypass(parts: &Parts) -> Option<AuthUser> {
    let id = parts
        .headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())?;

    let role = parts
        .headers
        .get(USER_ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map_or(Role::Staff, role::normalize_str);

    Some(AuthUser {
        id,
        role,
        expires_at: None,
    })
}
