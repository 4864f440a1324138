//! Access Server - 员工平台账号与仓库访问管理后台
//!
//! # 架构概述
//!
//! - **认证** (`auth`): 单管理员 JWT 会话，刷新令牌轮换
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 (管理员 / 员工 / 平台凭证)
//! - **外部平台** (`platforms`): GitHub、MongoDB Atlas 客户端与响应归一化
//! - **服务** (`services`): 会话、员工目录、凭证、访问协调
//! - **HTTP API** (`api`): RESTful 接口
//!
//! # 模块结构
//!
//! ```text
//! access-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # JWT、认证中间件
//! ├── db/            # 数据库层
//! ├── platforms/     # 外部平台客户端
//! ├── services/      # 业务服务
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、校验、提取器
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod platforms;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentAdmin, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 加载 .env 并初始化日志
///
/// 日志级别与目录在配置解析之前读取，保证配置错误也能被记录。
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty());
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ___                                _____
   /   | _____________  __________    / ___/___  ______   _____  _____
  / /| |/ ___/ ___/ _ \/ ___/ ___/    \__ \/ _ \/ ___/ | / / _ \/ ___/
 / ___ / /__/ /__/  __(__  |__  )    ___/ /  __/ /   | |/ /  __/ /
/_/  |_\___/\___/\___/____/____/    /____/\___/_/    |___/\___/_/
    "#
    );
}
