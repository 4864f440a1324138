//! MongoDB Atlas 数据库用户操作

use shared::models::{
    AtlasPasswordRequest, AtlasUserRequest, AtlasUserResponse, MessageResponse,
    PlatformCredentials, PlatformKind,
};

use super::{CredentialStore, account_not_found, forbidden, transport_error, upstream_error};
use crate::platforms::{AtlasClient, Outcome, normalize};
use crate::utils::validation::{MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, require_field};
use crate::utils::{AppError, AppResult};

const FORBIDDEN_MESSAGE: &str = "Invalid MongoDB Atlas API key or insufficient permissions.";

#[derive(Clone)]
pub struct AtlasAccounts {
    credentials: CredentialStore,
    atlas: AtlasClient,
}

impl AtlasAccounts {
    pub fn new(credentials: CredentialStore, atlas: AtlasClient) -> Self {
        Self { credentials, atlas }
    }

    async fn key_pair(&self) -> AppResult<(String, String)> {
        match self.credentials.resolve(PlatformKind::MongoDb).await? {
            PlatformCredentials::MongoDb {
                public_key,
                api_key,
            } => Ok((public_key, api_key)),
            _ => Err(AppError::platform_not_configured("MongoDB")),
        }
    }

    /// 确认数据库用户存在
    pub async fn validate_user(&self, req: AtlasUserRequest) -> AppResult<AtlasUserResponse> {
        let username = require_field(req.username.as_deref(), "username", MAX_SHORT_TEXT_LEN)?;
        let project_id = require_field(req.project_id.as_deref(), "projectId", MAX_SHORT_TEXT_LEN)?;
        let (public_key, private_key) = self.key_pair().await?;

        let response = self
            .atlas
            .get_database_user(&public_key, &private_key, &project_id, &username)
            .await
            .map_err(|e| transport_error("MongoDB", e))?;

        match normalize(response) {
            Outcome::Success { body, .. } => Ok(AtlasUserResponse {
                message: "MongoDB user exists".to_string(),
                user: body.unwrap_or_default(),
            }),
            Outcome::AccountNotFound { body } => Err(account_not_found(
                format!("MongoDB user {username} not found"),
                body,
            )),
            Outcome::Forbidden { body } => Err(forbidden(FORBIDDEN_MESSAGE, body)),
            Outcome::UpstreamError { status, body } => {
                Err(upstream_error("Error validating MongoDB user", status, body))
            }
        }
    }

    /// 修改数据库用户密码
    pub async fn change_password(&self, req: AtlasPasswordRequest) -> AppResult<MessageResponse> {
        let username = require_field(req.username.as_deref(), "username", MAX_SHORT_TEXT_LEN)?;
        let project_id = require_field(req.project_id.as_deref(), "projectId", MAX_SHORT_TEXT_LEN)?;
        // 密码原样提交，不做 trim
        let new_password = req
            .new_password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::required("newPassword"))?;
        if new_password.len() > MAX_PASSWORD_LEN {
            return Err(AppError::validation("newPassword is too long").with_detail("field", "newPassword"));
        }
        let (public_key, private_key) = self.key_pair().await?;

        let response = self
            .atlas
            .update_password(&public_key, &private_key, &project_id, &username, &new_password)
            .await
            .map_err(|e| transport_error("MongoDB", e))?;

        match normalize(response) {
            Outcome::Success { .. } => {
                tracing::info!(username = %username, project_id = %project_id, "Atlas password changed");
                Ok(MessageResponse::new(format!(
                    "Password updated successfully for user {username}"
                )))
            }
            Outcome::AccountNotFound { body } => Err(account_not_found(
                format!("MongoDB user {username} not found"),
                body,
            )),
            Outcome::Forbidden { body } => Err(forbidden(FORBIDDEN_MESSAGE, body)),
            Outcome::UpstreamError { status, body } => Err(upstream_error(
                "Error updating MongoDB user password",
                status,
                body,
            )),
        }
    }
}
