use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use ts_rs::TS;
use utoipa::ToSchema;

/// Role
///
/// The canonical role used for every access decision in the application.
/// Raw role values coming from tokens, headers or request bodies are always
/// funnelled through [`normalize`] before they reach this type.
///
/// Serializes in its display form (`SUPERADMIN`, `OWNER`, `STAFF`).
/// Deserialization accepts any JSON shape and never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, TS, ToSchema)]
#[ts(export)]
pub enum Role {
    #[serde(rename = "SUPERADMIN")]
    SuperAdmin,
    #[serde(rename = "OWNER")]
    Owner,
    // Least privileged; the fallback for anything unrecognized.
    #[default]
    #[serde(rename = "STAFF")]
    Staff,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::SuperAdmin, Role::Owner, Role::Staff];

    /// Upper-case form shown in the dashboards.
    pub fn as_display(self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPERADMIN",
            Role::Owner => "OWNER",
            Role::Staff => "STAFF",
        }
    }

    /// Snake-case form used as the key of permission grants.
    pub fn as_permission_key(self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Owner => "owner",
            Role::Staff => "staff",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_display())
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        normalize_str(raw)
    }
}

impl From<&Value> for Role {
    fn from(raw: &Value) -> Self {
        normalize(raw)
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(normalize(&raw))
    }
}

/// Object keys that may carry a role, in lookup order.
const ROLE_FIELDS: [&str; 4] = ["role", "name", "type", "value"];

/// normalize
///
/// Resolves any raw role value to a canonical [`Role`]. The function is total:
/// - `null`, `false`, `0` and `""` resolve to `Staff`.
/// - Arrays resolve through their first element.
/// - Objects resolve through the first non-null field among `role`, `name`,
///   `type` and `value`.
/// - Strings are classified case-insensitively, ignoring surrounding whitespace.
/// - Everything else resolves to `Staff`.
pub fn normalize(raw: &Value) -> Role {
    match raw {
        Value::String(s) => normalize_str(s),
        Value::Array(items) => items.first().map_or(Role::Staff, normalize),
        Value::Object(fields) => ROLE_FIELDS
            .iter()
            .find_map(|key| fields.get(*key).filter(|v| !v.is_null()))
            .map_or(Role::Staff, normalize),
        Value::Null | Value::Bool(_) | Value::Number(_) => Role::Staff,
    }
}

/// normalize_str
///
/// Classifies a role string by exact membership after trimming and lower-casing.
/// Unknown strings degrade to `Staff` rather than failing open.
pub fn normalize_str(raw: &str) -> Role {
    match raw.trim().to_lowercase().as_str() {
        "superadmin" | "super_admin" | "admin" => Role::SuperAdmin,
        "owner" | "salon_owner" => Role::Owner,
        "staff" | "employee" => Role::Staff,
        _ => Role::Staff,
    }
}
