//! Access reconciliation DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Target repository for grant / revoke
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoTarget {
    #[serde(default)]
    pub repo_owner: Option<String>,
    #[serde(default)]
    pub repo_name: Option<String>,
}

/// Successful grant / revoke
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessResponse {
    pub message: String,
    pub upstream_status: u16,
    /// Platform response body, when it sent one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream: Option<Value>,
}

/// Atlas database user lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Atlas database user password change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasPasswordRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Atlas user lookup result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasUserResponse {
    pub message: String,
    pub user: Value,
}
