use crate::auth::JwtConfig;
use crate::core::ServerError;

/// 员工删除语义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    /// 直接删除文档
    #[default]
    Hard,
    /// 标记 deleted_at，平台关联状态置为 deleted
    Soft,
}

impl std::str::FromStr for DeleteMode {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hard" => Ok(Self::Hard),
            "soft" => Ok(Self::Soft),
            other => Err(ServerError::Config(format!(
                "EMPLOYEE_DELETE_MODE must be 'hard' or 'soft', got '{other}'"
            ))),
        }
    }
}

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | DATABASE_PATH | ./data/access.db | 数据库目录 (`memory` 使用内存引擎) |
/// | DATABASE_NS / DATABASE_DB | access / main | 命名空间 / 数据库 |
/// | JWT_SECRET / REFRESH_TOKEN_SECRET | 开发环境自动生成 | 令牌签名密钥 |
/// | JWT_ACCESS_TTL_MINUTES / JWT_REFRESH_TTL_DAYS | 15 / 7 | 令牌有效期 |
/// | ADMIN_EMAIL / ADMIN_PASSWORD | - | 初始管理员 |
/// | GITHUB_API_URL | https://api.github.com | GitHub API 地址 |
/// | ATLAS_API_URL | https://cloud.mongodb.com/api/atlas/v2 | Atlas Admin API 地址 |
/// | PLATFORM_TIMEOUT_SECS | 10 | 外部平台请求超时 (秒) |
/// | EMPLOYEE_DELETE_MODE | hard | hard / soft |
/// | LOG_LEVEL / LOG_DIR | info / - | 日志级别 / 日志目录 |
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 数据库路径
    pub database_path: String,
    pub database_ns: String,
    pub database_db: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 初始管理员邮箱
    pub admin_email: Option<String>,
    /// 初始管理员密码
    pub admin_password: Option<String>,
    pub github_api_url: String,
    pub atlas_api_url: String,
    /// 外部平台请求超时 (秒)
    pub platform_timeout_secs: u64,
    pub delete_mode: DeleteMode,
    pub log_level: String,
    pub log_dir: Option<String>,
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_opt(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置的项使用默认值；非开发环境缺少签名密钥时返回错误。
    pub fn from_env() -> Result<Self, ServerError> {
        let environment = env_or("ENVIRONMENT", "development");
        let is_development = environment == "development";

        let delete_mode = match env_opt("EMPLOYEE_DELETE_MODE") {
            Some(mode) => mode.parse()?,
            None => DeleteMode::default(),
        };

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            jwt: JwtConfig::from_env(is_development)
                .map_err(|e| ServerError::Config(e.to_string()))?,
            environment,
            database_path: env_or("DATABASE_PATH", "./data/access.db"),
            database_ns: env_or("DATABASE_NS", "access"),
            database_db: env_or("DATABASE_DB", "main"),
            admin_email: env_opt("ADMIN_EMAIL"),
            admin_password: env_opt("ADMIN_PASSWORD"),
            github_api_url: env_or("GITHUB_API_URL", "https://api.github.com"),
            atlas_api_url: env_or("ATLAS_API_URL", "https://cloud.mongodb.com/api/atlas/v2"),
            platform_timeout_secs: std::env::var("PLATFORM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(10),
            delete_mode,
            log_level: env_or("LOG_LEVEL", "info"),
            log_dir: env_opt("LOG_DIR"),
        })
    }

    /// 内存数据库 + 开发密钥，常用于测试场景
    pub fn in_memory() -> Self {
        Self {
            database_path: crate::db::MEMORY_PATH.to_string(),
            ..Self::default()
        }
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 5000,
            environment: "development".to_string(),
            database_path: "./data/access.db".to_string(),
            database_ns: "access".to_string(),
            database_db: "main".to_string(),
            jwt: JwtConfig::default(),
            admin_email: None,
            admin_password: None,
            github_api_url: "https://api.github.com".to_string(),
            atlas_api_url: "https://cloud.mongodb.com/api/atlas/v2".to_string(),
            platform_timeout_secs: 10,
            delete_mode: DeleteMode::Hard,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_mode_parse() {
        assert_eq!("hard".parse::<DeleteMode>().unwrap(), DeleteMode::Hard);
        assert_eq!(" Soft ".parse::<DeleteMode>().unwrap(), DeleteMode::Soft);
        assert!("archive".parse::<DeleteMode>().is_err());
    }

    #[test]
    fn test_in_memory_defaults() {
        let config = Config::in_memory();
        assert_eq!(config.database_path, "memory");
        assert_eq!(config.platform_timeout_secs, 10);
        assert_eq!(config.jwt.access_ttl_minutes, 15);
        assert_eq!(config.jwt.refresh_ttl_days, 7);
        assert_ne!(config.jwt.access_secret, config.jwt.refresh_secret);
        assert!(config.is_development());
    }
}
