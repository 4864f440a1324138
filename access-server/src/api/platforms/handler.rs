//! Platform API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use shared::models::{MessageResponse, PlatformCreate, PlatformSummary};

use crate::core::ServerState;
use crate::utils::{AppResult, ValidJson};

/// List platforms; credential blobs are never returned
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<PlatformSummary>>> {
    let platforms = state.credentials().list().await?;
    Ok(Json(platforms))
}

/// Store credentials for a platform
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<PlatformCreate>,
) -> AppResult<(StatusCode, Json<PlatformSummary>)> {
    let summary = state.credentials().create(payload).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.credentials().delete(&id).await?;
    Ok(Json(MessageResponse::new("Platform deleted")))
}

/// Organization repositories, fetched with the stored GitHub token
pub async fn list_org_repos(
    State(state): State<ServerState>,
    Path(org): Path<String>,
) -> AppResult<Json<Value>> {
    let repos = state.reconciler().list_org_repos(&org).await?;
    Ok(Json(repos))
}
