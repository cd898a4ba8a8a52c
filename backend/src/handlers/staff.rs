//! Staff management handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::CurrentStaff;
use crate::services::staff::{CreateStaffInput, UpdateStaffInput};
use crate::services::StaffService;
use crate::AppState;
use crate::models::Staff;

/// Response for list of staff accounts
#[derive(Serialize)]
pub struct StaffListResponse {
    pub staff: Vec<Staff>,
}

/// List all staff accounts (admin only)
pub async fn list_staff(
    State(state): State<AppState>,
    CurrentStaff(current): CurrentStaff,
) -> Result<Json<StaffListResponse>, AppError> {
    if !current.is_admin() {
        return Err(AppError::InsufficientPermissions);
    }

    let service = StaffService::new(state.db.clone());
    let staff = service.list().await?;

    Ok(Json(StaffListResponse { staff }))
}

/// Get a staff account by id (admin only)
pub async fn get_staff(
    State(state): State<AppState>,
    CurrentStaff(current): CurrentStaff,
    Path(staff_id): Path<Uuid>,
) -> Result<Json<Staff>, AppError> {
    if !current.is_admin() {
        return Err(AppError::InsufficientPermissions);
    }

    let service = StaffService::new(state.db.clone());
    let staff = service.get(staff_id).await?;

    Ok(Json(staff))
}

/// Create a staff account (admin only)
pub async fn create_staff(
    State(state): State<AppState>,
    CurrentStaff(current): CurrentStaff,
    Json(input): Json<CreateStaffInput>,
) -> Result<(StatusCode, Json<Staff>), AppError> {
    if !current.is_admin() {
        return Err(AppError::InsufficientPermissions);
    }

    let service = StaffService::new(state.db.clone());
    let staff = service.create(input).await?;

    Ok((StatusCode::CREATED, Json(staff)))
}

/// Partially update a staff account (admin only)
pub async fn update_staff(
    State(state): State<AppState>,
    CurrentStaff(current): CurrentStaff,
    Path(staff_id): Path<Uuid>,
    Json(input): Json<UpdateStaffInput>,
) -> Result<Json<Staff>, AppError> {
    if !current.is_admin() {
        return Err(AppError::InsufficientPermissions);
    }

    let service = StaffService::new(state.db.clone());
    let staff = service.update(staff_id, input).await?;

    Ok(Json(staff))
}

/// Delete a staff account (admin only)
pub async fn delete_staff(
    State(state): State<AppState>,
    CurrentStaff(current): CurrentStaff,
    Path(staff_id): Path<Uuid>,
) -> Result<Json<()>, AppError> {
    if !current.is_admin() {
        return Err(AppError::InsufficientPermissions);
    }

    let service = StaffService::new(state.db.clone());
    service.delete(staff_id).await?;

    Ok(Json(()))
}
