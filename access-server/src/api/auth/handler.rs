//! Authentication Handlers
//!
//! Login, token rotation, logout and the current admin

use axum::{Json, extract::State};
use shared::models::{AdminInfo, LoginRequest, MessageResponse, RefreshRequest, TokenPair};

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ValidJson};

/// Login handler
///
/// Returns a fresh access/refresh pair; any previous refresh token stops working
pub async fn login(
    State(state): State<ServerState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> AppResult<Json<TokenPair>> {
    let pair = state.sessions().login(&req.email, &req.password).await?;
    Ok(Json(pair))
}

/// Rotate the refresh token
///
/// A missing or unreadable body counts as a missing token (401, not 400).
pub async fn refresh(
    State(state): State<ServerState>,
    body: Result<ValidJson<RefreshRequest>, AppError>,
) -> AppResult<Json<TokenPair>> {
    let token = body.ok().and_then(|ValidJson(req)| req.refresh_token);
    let pair = state.sessions().refresh(token.as_deref()).await?;
    Ok(Json(pair))
}

/// Logout handler
pub async fn logout(
    State(state): State<ServerState>,
    admin: CurrentAdmin,
) -> AppResult<Json<MessageResponse>> {
    state.sessions().logout(&admin).await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// Current admin
pub async fn me(admin: CurrentAdmin) -> Json<AdminInfo> {
    Json(AdminInfo {
        id: admin.id,
        email: admin.email,
    })
}
