//! Account Access Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{
    AccessResponse, AtlasPasswordRequest, AtlasUserRequest, AtlasUserResponse, MessageResponse,
    RepoTarget,
};

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::utils::{AppResult, ValidJson};

/// Grant repository access to the employee's linked account
pub async fn grant(
    State(state): State<ServerState>,
    admin: CurrentAdmin,
    Path((employee_id, platform)): Path<(String, String)>,
    ValidJson(target): ValidJson<RepoTarget>,
) -> AppResult<Json<AccessResponse>> {
    tracing::debug!(admin_id = %admin.id, employee_id = %employee_id, platform = %platform, "Grant requested");
    let result = state
        .reconciler()
        .grant(&employee_id, &platform, &target)
        .await?;
    Ok(Json(result))
}

/// Revoke repository access from the employee's linked account
pub async fn revoke(
    State(state): State<ServerState>,
    admin: CurrentAdmin,
    Path((employee_id, platform)): Path<(String, String)>,
    ValidJson(target): ValidJson<RepoTarget>,
) -> AppResult<Json<AccessResponse>> {
    tracing::debug!(admin_id = %admin.id, employee_id = %employee_id, platform = %platform, "Revoke requested");
    let result = state
        .reconciler()
        .revoke(&employee_id, &platform, &target)
        .await?;
    Ok(Json(result))
}

pub async fn validate_atlas_user(
    State(state): State<ServerState>,
    ValidJson(req): ValidJson<AtlasUserRequest>,
) -> AppResult<Json<AtlasUserResponse>> {
    let result = state.atlas().validate_user(req).await?;
    Ok(Json(result))
}

pub async fn change_atlas_password(
    State(state): State<ServerState>,
    ValidJson(req): ValidJson<AtlasPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let result = state.atlas().change_password(req).await?;
    Ok(Json(result))
}
