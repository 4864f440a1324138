use std::sync::Arc;
use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::{Config, ServerError};
use crate::db::DbService;
use crate::db::repository::{AdminRepository, EmployeeRepository, PlatformRepository};
use crate::platforms::{self, AtlasClient, GitHubApi, GitHubClient};
use crate::services::{
    AccessReconciler, AtlasAccounts, CredentialStore, EmployeeDirectory, GitHubAccountVerifier,
    SessionManager,
};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是廉价克隆 (Arc 或内部共享的句柄)，可直接作为 axum State。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | 嵌入式数据库 |
/// | jwt_service | JWT 令牌服务 |
/// | sessions | 管理员会话 |
/// | directory | 员工目录 |
/// | credentials | 平台凭证 |
/// | reconciler | 协作者授权 |
/// | atlas | Atlas 数据库用户 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    sessions: SessionManager,
    directory: EmployeeDirectory,
    credentials: CredentialStore,
    reconciler: AccessReconciler,
    atlas: AtlasAccounts,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据库 (打开存储并应用 schema)
    /// 2. 外部平台客户端 (共享带超时的 HTTP 客户端)
    /// 3. 各服务
    /// 4. 初始管理员
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        // 1. Database
        let db_service =
            DbService::new(&config.database_path, &config.database_ns, &config.database_db)
                .await?;
        let db = db_service.db;

        // 2. Platform clients
        let http = platforms::build_http_client(Duration::from_secs(config.platform_timeout_secs))
            .map_err(|e| ServerError::Config(e.to_string()))?;
        let github: Arc<dyn GitHubApi> = Arc::new(
            GitHubClient::new(http.clone(), &config.github_api_url)
                .map_err(|e| ServerError::Config(e.to_string()))?,
        );
        let atlas_client = AtlasClient::new(http, &config.atlas_api_url)
            .map_err(|e| ServerError::Config(e.to_string()))?;

        // 3. Services
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let sessions = SessionManager::new(AdminRepository::new(db.clone()), jwt_service.clone());
        let directory = EmployeeDirectory::new(
            EmployeeRepository::new(db.clone()),
            Arc::new(GitHubAccountVerifier::new(github.clone())),
            config.delete_mode,
        );
        let credentials = CredentialStore::new(PlatformRepository::new(db.clone()));
        let reconciler = AccessReconciler::new(
            EmployeeRepository::new(db.clone()),
            credentials.clone(),
            github,
        );
        let atlas = AtlasAccounts::new(credentials.clone(), atlas_client);

        // 4. Bootstrap admin
        sessions
            .bootstrap(config.admin_email.as_deref(), config.admin_password.as_deref())
            .await?;

        tracing::info!(
            delete_mode = ?config.delete_mode,
            platform_timeout_secs = config.platform_timeout_secs,
            "Server state initialized"
        );

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service,
            sessions,
            directory,
            credentials,
            reconciler,
            atlas,
        })
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn directory(&self) -> &EmployeeDirectory {
        &self.directory
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn reconciler(&self) -> &AccessReconciler {
        &self.reconciler
    }

    pub fn atlas(&self) -> &AtlasAccounts {
        &self.atlas
    }
}
