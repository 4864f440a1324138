//! 认证中间件
//!
//! 为 JWT 认证提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::JwtService;
use crate::core::ServerState;
use crate::security_log;

/// 无需认证的 API 路由
const PUBLIC_API_ROUTES: &[&str] = &["/api/auth/login", "/api/auth/refresh"];

/// 认证中间件 - 要求管理员登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证访问令牌，确认管理员仍然存在，
/// 然后将 [`CurrentAdmin`](crate::auth::CurrentAdmin) 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (`/health` 等)
/// - `/api/auth/login`, `/api/auth/refresh`
///
/// # 错误处理
///
/// | 错误 | 错误码 |
/// |------|--------|
/// | 无 Authorization 头 | NotAuthenticated |
/// | 令牌过期 | TokenExpired |
/// | 无效令牌 / 签名不符 | TokenInvalid |
/// | 管理员已不存在 | NotAuthenticated |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if PUBLIC_API_ROUTES.contains(&path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::not_authenticated());
        }
    };

    let admin = state.sessions().verify(token).await?;
    req.extensions_mut().insert(admin);
    Ok(next.run(req).await)
}
