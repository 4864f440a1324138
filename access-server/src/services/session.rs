//! 管理员会话管理
//!
//! 单管理员、单活动会话：管理员记录上只保存当前刷新令牌的 SHA-256 摘要。
//! 登录覆盖摘要，刷新通过条件更新轮换摘要，登出清空摘要。
//!
//! ```text
//! NoSession --login--> Active --refresh--> Active (新令牌) --logout--> NoSession
//! ```

use std::sync::Arc;

use shared::models::TokenPair;

use crate::auth::{CurrentAdmin, JwtService};
use crate::db::models::Admin;
use crate::db::repository::{AdminRepository, RepoError};
use crate::security_log;
use crate::utils::validation::{MAX_PASSWORD_LEN, normalize_email};
use crate::utils::{AppError, AppResult};

/// 管理员会话管理器
#[derive(Clone)]
pub struct SessionManager {
    admins: AdminRepository,
    jwt: Arc<JwtService>,
}

impl SessionManager {
    pub fn new(admins: AdminRepository, jwt: Arc<JwtService>) -> Self {
        Self { admins, jwt }
    }

    /// 登录：校验邮箱密码，签发新令牌对并替换已记录的刷新令牌
    pub async fn login(&self, email: &str, password: &str) -> AppResult<TokenPair> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() || password.len() > MAX_PASSWORD_LEN {
            security_log!("WARN", "login_failed", email = email.as_str(), reason = "missing_fields");
            return Err(AppError::invalid_credentials());
        }

        let admin = match self.admins.find_by_email(&email).await? {
            Some(admin) => admin,
            None => {
                security_log!("WARN", "login_failed", email = email.as_str(), reason = "unknown_admin");
                return Err(AppError::invalid_credentials());
            }
        };

        let password_valid = admin
            .verify_password(password)
            .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
        if !password_valid {
            security_log!("WARN", "login_failed", email = email.as_str(), reason = "bad_password");
            return Err(AppError::invalid_credentials());
        }

        let pair = self.jwt.generate_pair(&admin.key, &admin.email)?;
        let stored = self
            .admins
            .set_refresh_hash(&admin.key, Some(Admin::hash_refresh_token(&pair.refresh_token)))
            .await?;
        if !stored {
            return Err(AppError::invalid_credentials());
        }

        tracing::info!(admin_id = %admin.key, "Admin logged in");
        Ok(pair)
    }

    /// 刷新：令牌须通过签名校验且与记录中的摘要一致，成功后轮换
    pub async fn refresh(&self, refresh_token: Option<&str>) -> AppResult<TokenPair> {
        let token = refresh_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(AppError::not_authenticated)?;

        let claims = self.jwt.validate_refresh_token(token).map_err(|e| {
            security_log!("WARN", "refresh_invalid", reason = e.to_string());
            AppError::refresh_revoked()
        })?;

        let admin = self
            .admins
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(AppError::refresh_revoked)?;

        let presented = Admin::hash_refresh_token(token);
        if admin.refresh_token_hash.as_deref() != Some(presented.as_str()) {
            security_log!("WARN", "refresh_reuse", admin_id = admin.key.as_str());
            return Err(AppError::refresh_revoked());
        }

        let pair = self.jwt.generate_pair(&admin.key, &admin.email)?;
        let rotated = self
            .admins
            .rotate_refresh_hash(
                &admin.key,
                &presented,
                Admin::hash_refresh_token(&pair.refresh_token),
            )
            .await
            .map_err(|e| match e {
                // 并发轮换的写冲突等同于令牌已被使用
                RepoError::Database(msg) => {
                    tracing::warn!(admin_id = %admin.key, error = %msg, "Refresh rotation conflict");
                    AppError::refresh_revoked()
                }
                other => other.into(),
            })?;
        if !rotated {
            security_log!("WARN", "refresh_race_lost", admin_id = admin.key.as_str());
            return Err(AppError::refresh_revoked());
        }

        tracing::debug!(admin_id = %admin.key, "Refresh token rotated");
        Ok(pair)
    }

    /// 登出：清空记录中的刷新令牌摘要
    pub async fn logout(&self, admin: &CurrentAdmin) -> AppResult<()> {
        let cleared = self.admins.set_refresh_hash(&admin.id, None).await?;
        if !cleared {
            return Err(AppError::not_authenticated());
        }
        tracing::info!(admin_id = %admin.id, "Admin logged out");
        Ok(())
    }

    /// 验证访问令牌并确认管理员仍然存在
    pub async fn verify(&self, access_token: &str) -> AppResult<CurrentAdmin> {
        let claims = self.jwt.validate_access_token(access_token).map_err(|e| {
            security_log!("WARN", "token_rejected", reason = e.to_string());
            AppError::from(e)
        })?;

        match self.admins.find_by_id(&claims.sub).await? {
            Some(admin) => Ok(CurrentAdmin {
                id: admin.key,
                email: admin.email,
            }),
            None => {
                security_log!("WARN", "token_admin_missing", admin_id = claims.sub.as_str());
                Err(AppError::not_authenticated())
            }
        }
    }

    /// 启动时创建初始管理员 (已存在则跳过)
    pub async fn bootstrap(&self, email: Option<&str>, password: Option<&str>) -> AppResult<()> {
        let (Some(email), Some(password)) = (email, password) else {
            tracing::warn!("ADMIN_EMAIL / ADMIN_PASSWORD not set, skipping admin bootstrap");
            return Ok(());
        };

        let email = normalize_email(email)?;
        if password.is_empty() || password.len() > MAX_PASSWORD_LEN {
            return Err(AppError::validation("Admin password is empty or too long"));
        }

        if self.admins.find_by_email(&email).await?.is_some() {
            tracing::debug!(email = %email, "Admin already exists");
            return Ok(());
        }

        let hash = Admin::hash_password(password)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
        let admin = self.admins.create(&email, hash).await?;
        tracing::info!(admin_id = %admin.key, email = %admin.email, "Bootstrap admin created");
        Ok(())
    }
}
