//! Employee Model

use serde::{Deserialize, Serialize};

/// Status of an employee's account link on one platform
///
/// The set is open: values outside the well-known ones are kept verbatim.
/// Well-known values are matched case-insensitively and stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LinkStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
    Deleted,
    Other(String),
}

impl LinkStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
            Self::Deleted => "deleted",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for LinkStatus {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "active" => Self::Active,
            "inactive" => Self::Inactive,
            "suspended" => Self::Suspended,
            "deleted" => Self::Deleted,
            _ => Self::Other(trimmed.to_string()),
        }
    }
}

impl From<LinkStatus> for String {
    fn from(status: LinkStatus) -> Self {
        match status {
            LinkStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

/// The employee's identity on one external platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformLink {
    pub platform_name: String,
    pub account_id: String,
    #[serde(default)]
    pub status: LinkStatus,
}

impl PlatformLink {
    /// Whether this link belongs to `platform` (names compare case-insensitively)
    pub fn is_for(&self, platform: &str) -> bool {
        self.platform_name.eq_ignore_ascii_case(platform)
    }
}

/// Platform link as submitted by the dashboard, fields may be absent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformLinkInput {
    #[serde(default)]
    pub platform_name: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub status: Option<LinkStatus>,
}

impl PlatformLinkInput {
    /// Trimmed, complete link; `None` when platformName or accountId is blank
    pub fn normalize(&self) -> Option<PlatformLink> {
        let platform_name = self.platform_name.as_deref().map(str::trim).unwrap_or("");
        let account_id = self.account_id.as_deref().map(str::trim).unwrap_or("");
        if platform_name.is_empty() || account_id.is_empty() {
            return None;
        }
        Some(PlatformLink {
            platform_name: platform_name.to_string(),
            account_id: account_id.to_string(),
            status: self.status.clone().unwrap_or_default(),
        })
    }
}

/// Employee record as exposed over the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub platforms: Vec<PlatformLink>,
    pub created_at: i64,
    pub updated_at: i64,
    /// Set only by soft deletion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
}

impl Employee {
    /// First usable link for `platform`
    ///
    /// Links marked `deleted` or without an account id are ignored.
    pub fn link_for(&self, platform: &str) -> Option<&PlatformLink> {
        self.platforms.iter().find(|link| {
            link.is_for(platform)
                && link.status != LinkStatus::Deleted
                && !link.account_id.trim().is_empty()
        })
    }
}

/// Create / update payload
///
/// Update replaces name, email and the platform collection wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub platforms: Vec<PlatformLinkInput>,
}

/// Mutation response: `{ message, employee }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub message: String,
    pub employee: Employee,
}
