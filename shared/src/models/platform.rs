//! Platform Credential Model
//!
//! Credentials are stored as a flat string map and interpreted per platform,
//! so each integration can demand exactly the fields it needs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Known external platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformKind {
    GitHub,
    /// MongoDB Atlas
    MongoDb,
    Other,
}

impl PlatformKind {
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case("github") {
            Self::GitHub
        } else if name.eq_ignore_ascii_case("mongodb") {
            Self::MongoDb
        } else {
            Self::Other
        }
    }

    /// Name the platform's credential record is registered under
    pub fn canonical_name(&self) -> Option<&'static str> {
        match self {
            Self::GitHub => Some("GitHub"),
            Self::MongoDb => Some("MongoDB"),
            Self::Other => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("{platform} credentials require a non-empty '{field}'")]
    MissingField {
        platform: &'static str,
        field: &'static str,
    },

    #[error("credentials must contain at least one field")]
    Empty,
}

/// Credential blob, shaped by platform
#[derive(Clone, PartialEq, Eq)]
pub enum PlatformCredentials {
    GitHub {
        api_key: String,
    },
    /// Atlas programmatic API key pair; `api_key` is the private half
    MongoDb {
        public_key: String,
        api_key: String,
    },
    Generic(BTreeMap<String, String>),
}

impl fmt::Debug for PlatformCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitHub { .. } => f.write_str("GitHub { api_key: *** }"),
            Self::MongoDb { public_key, .. } => {
                write!(f, "MongoDb {{ public_key: {}, api_key: *** }}", public_key)
            }
            Self::Generic(fields) => {
                let keys: Vec<_> = fields.keys().collect();
                write!(f, "Generic({:?})", keys)
            }
        }
    }
}

fn require(
    fields: &BTreeMap<String, String>,
    platform: &'static str,
    field: &'static str,
) -> Result<String, CredentialError> {
    fields
        .get(field)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(CredentialError::MissingField { platform, field })
}

impl PlatformCredentials {
    /// Interpret stored fields for `kind`
    pub fn from_fields(
        kind: PlatformKind,
        fields: &BTreeMap<String, String>,
    ) -> Result<Self, CredentialError> {
        match kind {
            PlatformKind::GitHub => Ok(Self::GitHub {
                api_key: require(fields, "GitHub", "apiKey")?,
            }),
            PlatformKind::MongoDb => Ok(Self::MongoDb {
                public_key: require(fields, "MongoDB", "publicKey")?,
                api_key: require(fields, "MongoDB", "apiKey")?,
            }),
            PlatformKind::Other => {
                if fields.is_empty() {
                    return Err(CredentialError::Empty);
                }
                Ok(Self::Generic(fields.clone()))
            }
        }
    }

    /// Flatten back into the stored field map
    pub fn into_fields(self) -> BTreeMap<String, String> {
        match self {
            Self::GitHub { api_key } => BTreeMap::from([("apiKey".to_string(), api_key)]),
            Self::MongoDb {
                public_key,
                api_key,
            } => BTreeMap::from([
                ("publicKey".to_string(), public_key),
                ("apiKey".to_string(), api_key),
            ]),
            Self::Generic(fields) => fields,
        }
    }
}

/// Convert a submitted JSON object into the stored string map
///
/// Non-string scalars keep their JSON text; nulls are dropped.
pub fn fields_from_json(map: &serde_json::Map<String, Value>) -> BTreeMap<String, String> {
    map.iter()
        .filter_map(|(k, v)| match v {
            Value::Null => None,
            Value::String(s) => Some((k.clone(), s.clone())),
            other => Some((k.clone(), other.to_string())),
        })
        .collect()
}

/// Create platform payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub api_endpoint: Option<String>,
    #[serde(default)]
    pub auth_method: Option<String>,
    #[serde(default)]
    pub credentials: serde_json::Map<String, Value>,
}

/// Platform record without its credential blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSummary {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_method: Option<String>,
    /// Whether the stored credential satisfies the platform's required shape
    pub configured: bool,
    pub created_at: i64,
}
