//! Audit log handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::CurrentStaff;
use crate::services::AuditLogService;
use crate::AppState;
use crate::models::AuditLog;

/// List all login events, newest first (admin only)
pub async fn list_logs(
    State(state): State<AppState>,
    CurrentStaff(current): CurrentStaff,
) -> Result<Json<Vec<AuditLog>>, AppError> {
    if !current.is_admin() {
        return Err(AppError::InsufficientPermissions);
    }

    let service = AuditLogService::new(state.db.clone());
    let logs = service.list_all().await?;

    Ok(Json(logs))
}

/// List login events for one user, newest first (admin only)
pub async fn list_logs_by_user(
    State(state): State<AppState>,
    CurrentStaff(current): CurrentStaff,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<AuditLog>>, AppError> {
    if !current.is_admin() {
        return Err(AppError::InsufficientPermissions);
    }

    let service = AuditLogService::new(state.db.clone());
    let logs = service.list_by_user(user_id).await?;

    Ok(Json(logs))
}
