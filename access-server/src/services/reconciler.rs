//! 访问协调器
//!
//! 授权 / 撤销员工在外部平台上的仓库协作者权限。每次调用按顺序执行：
//!
//! 1. 校验目标仓库 (owner / name)
//! 2. 查找员工 → EmployeeNotFound
//! 3. 取出平台凭证 → PlatformNotConfigured
//! 4. 查找员工在该平台的关联账号 → PlatformNotLinked
//! 5. 发起一次外部调用 (不重试)
//! 6. 归一化响应: 2xx 成功 / 404 账号不存在 / 403 无权限 / 其他上游错误

use std::sync::Arc;

use serde_json::Value;
use shared::error::ErrorCode;
use shared::models::{AccessResponse, Employee, PlatformCredentials, PlatformKind, RepoTarget};

use super::{CredentialStore, account_not_found, forbidden, transport_error, upstream_error};
use crate::db::repository::EmployeeRepository;
use crate::platforms::{GitHubApi, Outcome, normalize};
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// 授权方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessAction {
    Grant,
    Revoke,
}

struct Target {
    owner: String,
    repo: String,
}

impl Target {
    fn parse(target: &RepoTarget) -> AppResult<Self> {
        let owner = target.repo_owner.as_deref().map(str::trim).unwrap_or("");
        let repo = target.repo_name.as_deref().map(str::trim).unwrap_or("");
        if owner.is_empty() || repo.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "Repository owner and name are required.",
            ));
        }
        validate_required_text(owner, "repoOwner", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(repo, "repoName", MAX_SHORT_TEXT_LEN)?;
        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

#[derive(Clone)]
pub struct AccessReconciler {
    employees: EmployeeRepository,
    credentials: CredentialStore,
    github: Arc<dyn GitHubApi>,
}

impl AccessReconciler {
    pub fn new(
        employees: EmployeeRepository,
        credentials: CredentialStore,
        github: Arc<dyn GitHubApi>,
    ) -> Self {
        Self {
            employees,
            credentials,
            github,
        }
    }

    /// 添加仓库协作者
    pub async fn grant(
        &self,
        employee_id: &str,
        platform: &str,
        target: &RepoTarget,
    ) -> AppResult<AccessResponse> {
        self.reconcile(AccessAction::Grant, employee_id, platform, target)
            .await
    }

    /// 移除仓库协作者
    pub async fn revoke(
        &self,
        employee_id: &str,
        platform: &str,
        target: &RepoTarget,
    ) -> AppResult<AccessResponse> {
        self.reconcile(AccessAction::Revoke, employee_id, platform, target)
            .await
    }

    async fn reconcile(
        &self,
        action: AccessAction,
        employee_id: &str,
        platform: &str,
        target: &RepoTarget,
    ) -> AppResult<AccessResponse> {
        let target = Target::parse(target)?;

        let kind = PlatformKind::from_name(platform);
        if kind != PlatformKind::GitHub {
            return Err(AppError::with_message(
                ErrorCode::PlatformUnsupported,
                format!("Collaborator management is not supported for platform '{platform}'."),
            )
            .with_detail("platform", platform));
        }

        let employee: Employee = self
            .employees
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| AppError::employee_not_found(employee_id))?
            .into();

        let token = match self.credentials.resolve(kind).await? {
            PlatformCredentials::GitHub { api_key } => api_key,
            _ => return Err(AppError::platform_not_configured("GitHub")),
        };

        let account = employee
            .link_for("GitHub")
            .map(|link| link.account_id.trim().to_string())
            .ok_or_else(|| AppError::platform_not_linked("GitHub"))?;

        let response = match action {
            AccessAction::Grant => {
                self.github
                    .add_collaborator(&token, &target.owner, &target.repo, &account)
                    .await
            }
            AccessAction::Revoke => {
                self.github
                    .remove_collaborator(&token, &target.owner, &target.repo, &account)
                    .await
            }
        }
        .map_err(|e| transport_error("GitHub", e))?;

        let repo_path = format!("{}/{}", target.owner, target.repo);
        match normalize(response) {
            Outcome::Success { status, body } => {
                let message = match action {
                    AccessAction::Grant => {
                        format!("Employee {account} added as collaborator to {repo_path}")
                    }
                    AccessAction::Revoke => format!("Employee {account} removed from {repo_path}"),
                };
                tracing::info!(
                    employee_id = %employee.id,
                    account = %account,
                    repo = %repo_path,
                    action = ?action,
                    upstream_status = status,
                    "Collaborator access reconciled"
                );
                Ok(AccessResponse {
                    message,
                    upstream_status: status,
                    upstream: body,
                })
            }
            Outcome::AccountNotFound { body } => Err(account_not_found(
                format!("GitHub account '{account}' not found."),
                body,
            )),
            Outcome::Forbidden { body } => Err(forbidden(
                "Invalid GitHub token or insufficient permissions.",
                body,
            )),
            Outcome::UpstreamError { status, body } => {
                tracing::warn!(
                    employee_id = %employee.id,
                    repo = %repo_path,
                    upstream_status = status,
                    "GitHub rejected collaborator change"
                );
                let message = match action {
                    AccessAction::Grant => "Error adding collaborator",
                    AccessAction::Revoke => "Error removing collaborator",
                };
                Err(upstream_error(message, status, body))
            }
        }
    }

    /// 使用已存储的 GitHub 凭证列出组织仓库
    pub async fn list_org_repos(&self, org: &str) -> AppResult<Value> {
        let org = org.trim();
        validate_required_text(org, "org", MAX_SHORT_TEXT_LEN)?;

        let token = match self.credentials.resolve(PlatformKind::GitHub).await? {
            PlatformCredentials::GitHub { api_key } => api_key,
            _ => return Err(AppError::platform_not_configured("GitHub")),
        };

        let response = self
            .github
            .list_org_repos(&token, org)
            .await
            .map_err(|e| transport_error("GitHub", e))?;

        match normalize(response) {
            Outcome::Success { body, .. } => Ok(body.unwrap_or_else(|| Value::Array(Vec::new()))),
            Outcome::AccountNotFound { body } => Err(account_not_found(
                format!("GitHub organization '{org}' not found."),
                body,
            )),
            Outcome::Forbidden { body } => Err(forbidden(
                "Invalid GitHub token or insufficient permissions.",
                body,
            )),
            Outcome::UpstreamError { status, body } => {
                Err(upstream_error("Error fetching repositories", status, body))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(owner: Option<&str>, name: Option<&str>) -> RepoTarget {
        RepoTarget {
            repo_owner: owner.map(str::to_string),
            repo_name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_target_requires_both_fields() {
        let err = Target::parse(&target(Some("octo"), None)).err().unwrap();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "Repository owner and name are required.");

        assert!(Target::parse(&target(Some(" "), Some("repo"))).is_err());

        let parsed = Target::parse(&target(Some(" octo "), Some("hello"))).unwrap();
        assert_eq!(parsed.owner, "octo");
        assert_eq!(parsed.repo, "hello");
    }
}
