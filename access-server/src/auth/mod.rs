//! 认证模块
//!
//! - [`JwtService`] - JWT 令牌服务 (访问令牌 / 刷新令牌)
//! - [`CurrentAdmin`] - 当前管理员上下文
//! - [`require_auth`] - 认证中间件

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentAdmin, JwtConfig, JwtError, JwtService, TokenType};
pub use middleware::require_auth;
