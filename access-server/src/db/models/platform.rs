//! Platform Model

use serde::{Deserialize, Serialize};
use shared::models::{PlatformCredentials, PlatformKind, PlatformSummary};
use std::collections::BTreeMap;

/// Platform credential row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformRecord {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub api_endpoint: Option<String>,
    #[serde(default)]
    pub auth_method: Option<String>,
    #[serde(default)]
    pub credentials: BTreeMap<String, String>,
    pub created_at: i64,
}

impl PlatformRecord {
    pub fn kind(&self) -> PlatformKind {
        PlatformKind::from_name(&self.name)
    }

    /// Typed credentials; `None` when the stored blob is incomplete
    pub fn credentials(&self) -> Option<PlatformCredentials> {
        PlatformCredentials::from_fields(self.kind(), &self.credentials).ok()
    }

    pub fn summary(&self) -> PlatformSummary {
        PlatformSummary {
            id: self.key.clone(),
            name: self.name.clone(),
            api_endpoint: self.api_endpoint.clone(),
            auth_method: self.auth_method.clone(),
            configured: self.credentials().is_some(),
            created_at: self.created_at,
        }
    }
}
