//! 业务服务层
//!
//! - [`SessionManager`] - 管理员会话 (登录 / 刷新 / 登出 / 验证)
//! - [`EmployeeDirectory`] - 员工目录及平台关联校验
//! - [`CredentialStore`] - 平台凭证
//! - [`AccessReconciler`] - 仓库协作者授权 / 撤销
//! - [`AtlasAccounts`] - MongoDB Atlas 数据库用户操作

pub mod atlas;
pub mod credentials;
pub mod directory;
pub mod reconciler;
pub mod session;

pub use atlas::AtlasAccounts;
pub use credentials::CredentialStore;
pub use directory::{AccountVerifier, EmployeeDirectory, GitHubAccountVerifier};
pub use reconciler::AccessReconciler;
pub use session::SessionManager;

use serde_json::Value;
use shared::error::{AppError, ErrorCode};

use crate::platforms::PlatformError;

/// 上游非预期响应 → PlatformUpstreamError，携带原始状态码和响应体
pub(crate) fn upstream_error(message: impl Into<String>, status: u16, body: Option<Value>) -> AppError {
    let err = AppError::with_message(ErrorCode::PlatformUpstreamError, message)
        .with_detail("upstreamStatus", status);
    match body {
        Some(body) => err.with_detail("upstream", body),
        None => err,
    }
}

/// 传输层失败 (超时 / 网络) → PlatformUpstreamError
pub(crate) fn transport_error(platform: &str, err: PlatformError) -> AppError {
    tracing::warn!(platform = %platform, error = %err, "Platform call failed");
    AppError::with_message(
        ErrorCode::PlatformUpstreamError,
        format!("{platform} request failed: {err}"),
    )
    .with_detail("timeout", matches!(err, PlatformError::Timeout))
}

/// 上游 404 → PlatformAccountNotFound
pub(crate) fn account_not_found(message: impl Into<String>, body: Option<Value>) -> AppError {
    let err = AppError::with_message(ErrorCode::PlatformAccountNotFound, message)
        .with_detail("upstreamStatus", 404);
    match body {
        Some(body) => err.with_detail("upstream", body),
        None => err,
    }
}

/// 上游 403 → PlatformForbidden
pub(crate) fn forbidden(message: impl Into<String>, body: Option<Value>) -> AppError {
    let err = AppError::with_message(ErrorCode::PlatformForbidden, message)
        .with_detail("upstreamStatus", 403);
    match body {
        Some(body) => err.with_detail("upstream", body),
        None => err,
    }
}
