//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{Employee, EmployeeInput, EmployeeResponse, MessageResponse};

use crate::core::ServerState;
use crate::utils::{AppResult, ValidJson};

/// List employees (soft-deleted ones excluded)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    let employees = state.directory().list().await?;
    Ok(Json(employees))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let employee = state.directory().get(&id).await?;
    Ok(Json(employee))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<EmployeeInput>,
) -> AppResult<(StatusCode, Json<EmployeeResponse>)> {
    let employee = state.directory().create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(EmployeeResponse {
            message: "Employee added successfully.".to_string(),
            employee,
        }),
    ))
}

/// Update an employee, replacing its platform links
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<EmployeeInput>,
) -> AppResult<Json<EmployeeResponse>> {
    let employee = state.directory().update(&id, payload).await?;
    Ok(Json(EmployeeResponse {
        message: "Employee updated successfully.".to_string(),
        employee,
    }))
}

/// Delete an employee (hard or soft, per configuration)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.directory().delete(&id).await?;
    Ok(Json(MessageResponse::new("Employee deleted successfully.")))
}
