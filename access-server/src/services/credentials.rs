//! 平台凭证存储
//!
//! 凭证按平台名唯一存储，对外只暴露摘要 (不含凭证内容)。

use shared::error::ErrorCode;
use shared::models::{
    PlatformCreate, PlatformCredentials, PlatformKind, PlatformSummary, fields_from_json,
};

use crate::db::repository::platform::PlatformDraft;
use crate::db::repository::{PlatformRepository, RepoError};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct CredentialStore {
    repo: PlatformRepository,
}

impl CredentialStore {
    pub fn new(repo: PlatformRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> AppResult<Vec<PlatformSummary>> {
        let records = self.repo.find_all().await?;
        Ok(records.iter().map(|r| r.summary()).collect())
    }

    /// 新建平台凭证，凭证字段须满足该平台要求的结构
    pub async fn create(&self, input: PlatformCreate) -> AppResult<PlatformSummary> {
        validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&input.api_endpoint, "apiEndpoint", MAX_URL_LEN)?;
        validate_optional_text(&input.auth_method, "authMethod", MAX_SHORT_TEXT_LEN)?;

        let name = input.name.trim().to_string();
        let fields = fields_from_json(&input.credentials);
        let credentials = PlatformCredentials::from_fields(PlatformKind::from_name(&name), &fields)
            .map_err(|e| AppError::validation(e.to_string()).with_detail("field", "credentials"))?;

        let draft = PlatformDraft {
            name,
            api_endpoint: input.api_endpoint.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()),
            auth_method: input.auth_method.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()),
            credentials: credentials.into_fields(),
        };

        let record = self.repo.create(draft).await.map_err(|e| match e {
            RepoError::Duplicate(msg) => AppError::already_exists(ErrorCode::PlatformNameExists, msg),
            other => other.into(),
        })?;
        tracing::info!(platform_id = %record.key, name = %record.name, "Platform credential stored");
        Ok(record.summary())
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::platform_not_found(id));
        }
        tracing::info!(platform_id = %id, "Platform credential deleted");
        Ok(())
    }

    /// 取出平台的有效凭证；缺失或不完整时返回 PlatformNotConfigured
    pub async fn resolve(&self, kind: PlatformKind) -> AppResult<PlatformCredentials> {
        let Some(name) = kind.canonical_name() else {
            return Err(AppError::with_message(
                ErrorCode::PlatformUnsupported,
                "Platform has no integration",
            ));
        };

        let record = self
            .repo
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::platform_not_configured(name))?;

        record.credentials().ok_or_else(|| {
            tracing::warn!(platform = %name, "Stored credential is incomplete");
            AppError::platform_not_configured(name)
        })
    }
}
