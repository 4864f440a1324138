//! 员工目录
//!
//! 创建 / 更新时逐个校验平台关联 (顺序执行，首个失败即中止，不产生部分写入)：
//!
//! 1. `platformName` 与 `accountId` 均不能为空
//! 2. GitHub 关联通过公开用户接口确认账号存在
//! 3. `status` 缺省为 `active`

use std::sync::Arc;

use async_trait::async_trait;
use shared::error::ErrorCode;
use shared::models::{Employee, EmployeeInput, LinkStatus, PlatformKind, PlatformLink, PlatformLinkInput};

use super::{account_not_found, forbidden, transport_error, upstream_error};
use crate::core::DeleteMode;
use crate::db::repository::employee::EmployeeDraft;
use crate::db::repository::{EmployeeRepository, RepoError};
use crate::platforms::{GitHubApi, Outcome, normalize};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, normalize_email, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// 平台账号存在性校验
#[async_trait]
pub trait AccountVerifier: Send + Sync {
    /// 账号存在 (或该平台无需校验) 时返回 Ok
    async fn verify(&self, link: &PlatformLink) -> AppResult<()>;
}

/// 使用 GitHub 公开用户接口校验 GitHub 关联，其他平台直接通过
#[derive(Clone)]
pub struct GitHubAccountVerifier {
    github: Arc<dyn GitHubApi>,
}

impl GitHubAccountVerifier {
    pub fn new(github: Arc<dyn GitHubApi>) -> Self {
        Self { github }
    }
}

#[async_trait]
impl AccountVerifier for GitHubAccountVerifier {
    async fn verify(&self, link: &PlatformLink) -> AppResult<()> {
        if PlatformKind::from_name(&link.platform_name) != PlatformKind::GitHub {
            return Ok(());
        }

        let response = self
            .github
            .get_user(&link.account_id)
            .await
            .map_err(|e| transport_error("GitHub", e))?;

        match normalize(response) {
            Outcome::Success { .. } => Ok(()),
            Outcome::AccountNotFound { .. } => Err(account_not_found(
                format!("GitHub account '{}' does not exist.", link.account_id),
                None,
            )
            .with_detail("accountId", link.account_id.as_str())),
            Outcome::Forbidden { body } => Err(forbidden(
                "GitHub refused the account lookup (rate limited or forbidden).",
                body,
            )),
            Outcome::UpstreamError { status, body } => Err(upstream_error(
                format!("Failed to verify GitHub account '{}'", link.account_id),
                status,
                body,
            )),
        }
    }
}

/// 校验并规范化提交的平台关联
pub async fn validate_platform_links(
    inputs: &[PlatformLinkInput],
    verifier: &dyn AccountVerifier,
) -> AppResult<Vec<PlatformLink>> {
    let mut links = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.iter().enumerate() {
        let link = input.normalize().ok_or_else(|| {
            AppError::with_message(
                ErrorCode::InvalidPlatformLink,
                format!(
                    "Platform link #{}: platformName and accountId are required",
                    index + 1
                ),
            )
            .with_detail("index", index)
        })?;
        validate_required_text(&link.platform_name, "platformName", MAX_NAME_LEN)?;
        validate_required_text(&link.account_id, "accountId", MAX_SHORT_TEXT_LEN)?;

        verifier.verify(&link).await?;
        links.push(link);
    }
    Ok(links)
}

fn map_repo_error(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(msg) => AppError::already_exists(ErrorCode::EmployeeEmailExists, msg),
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::EmployeeNotFound, msg),
        other => other.into(),
    }
}

/// 员工目录服务
#[derive(Clone)]
pub struct EmployeeDirectory {
    repo: EmployeeRepository,
    verifier: Arc<dyn AccountVerifier>,
    delete_mode: DeleteMode,
}

impl EmployeeDirectory {
    pub fn new(
        repo: EmployeeRepository,
        verifier: Arc<dyn AccountVerifier>,
        delete_mode: DeleteMode,
    ) -> Self {
        Self {
            repo,
            verifier,
            delete_mode,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Employee>> {
        let records = self.repo.find_all().await?;
        Ok(records.into_iter().map(Employee::from).collect())
    }

    /// 获取未删除的员工
    pub async fn get(&self, id: &str) -> AppResult<Employee> {
        self.repo
            .find_by_id(id)
            .await?
            .map(Employee::from)
            .ok_or_else(|| AppError::employee_not_found(id))
    }

    async fn draft(&self, input: EmployeeInput) -> AppResult<EmployeeDraft> {
        validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
        let email = normalize_email(&input.email)?;
        let platforms = validate_platform_links(&input.platforms, self.verifier.as_ref()).await?;
        Ok(EmployeeDraft {
            name: input.name.trim().to_string(),
            email,
            platforms,
        })
    }

    pub async fn create(&self, input: EmployeeInput) -> AppResult<Employee> {
        let draft = self.draft(input).await?;
        let record = self.repo.create(draft).await.map_err(map_repo_error)?;
        tracing::info!(employee_id = %record.key, "Employee created");
        Ok(record.into())
    }

    /// 整体替换姓名、邮箱与平台关联
    pub async fn update(&self, id: &str, input: EmployeeInput) -> AppResult<Employee> {
        // 先确认存在，避免对不存在的员工发起外部校验
        self.get(id).await?;
        let draft = self.draft(input).await?;
        let record = self.repo.update(id, draft).await.map_err(map_repo_error)?;
        tracing::info!(employee_id = %record.key, "Employee updated");
        Ok(record.into())
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let deleted = match self.delete_mode {
            DeleteMode::Hard => {
                // 软删除残留的记录对外同样不存在
                if self.repo.find_by_id(id).await?.is_none() {
                    return Err(AppError::employee_not_found(id));
                }
                self.repo.delete(id).await?
            }
            DeleteMode::Soft => {
                let employee = self.get(id).await?;
                let links: Vec<PlatformLink> = employee
                    .platforms
                    .into_iter()
                    .map(|link| PlatformLink {
                        status: LinkStatus::Deleted,
                        ..link
                    })
                    .collect();
                self.repo.soft_delete(id, &links).await?
            }
        };

        if !deleted {
            return Err(AppError::employee_not_found(id));
        }
        tracing::info!(employee_id = %id, mode = ?self.delete_mode, "Employee deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Accepts every account except those listed as missing; counts calls
    #[derive(Default)]
    struct StubVerifier {
        missing: Vec<&'static str>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AccountVerifier for StubVerifier {
        async fn verify(&self, link: &PlatformLink) -> AppResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.missing.iter().any(|m| *m == link.account_id) {
                return Err(AppError::with_message(
                    ErrorCode::PlatformAccountNotFound,
                    format!("GitHub account '{}' does not exist.", link.account_id),
                ));
            }
            Ok(())
        }
    }

    fn input(platform: Option<&str>, account: Option<&str>) -> PlatformLinkInput {
        PlatformLinkInput {
            platform_name: platform.map(str::to_string),
            account_id: account.map(str::to_string),
            status: None,
        }
    }

    #[tokio::test]
    async fn test_status_defaults_to_active() {
        let verifier = StubVerifier::default();
        let links = validate_platform_links(&[input(Some(" GitHub "), Some("validuser"))], &verifier)
            .await
            .unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].platform_name, "GitHub");
        assert_eq!(links[0].status, LinkStatus::Active);
    }

    #[tokio::test]
    async fn test_blank_field_names_failing_link() {
        let verifier = StubVerifier::default();
        let err = validate_platform_links(
            &[input(Some("GitHub"), Some("ok")), input(Some("GitHub"), Some("  "))],
            &verifier,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPlatformLink);
        assert!(err.message.contains("#2"));
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fail_fast_on_missing_account() {
        let verifier = StubVerifier {
            missing: vec!["ghost-user-does-not-exist"],
            ..Default::default()
        };
        let err = validate_platform_links(
            &[
                input(Some("GitHub"), Some("ghost-user-does-not-exist")),
                input(Some("GitHub"), Some("validuser")),
            ],
            &verifier,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::PlatformAccountNotFound);
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_platform_name() {
        let verifier = StubVerifier::default();
        let err = validate_platform_links(&[input(None, Some("octo"))], &verifier)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPlatformLink);
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
    }
}
