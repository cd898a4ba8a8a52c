//! Authentication handlers

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::AppError;
use crate::services::auth::LoginOutcome;
use crate::services::{AuditLogService, AuthService};
use crate::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login endpoint handler. Appends a login event to the audit log.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginOutcome>, AppError> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let outcome = auth_service.login(&body.username, &body.password).await?;

    let audit_service = AuditLogService::new(state.db.clone());
    audit_service
        .record(outcome.staff.id, &outcome.staff.username, outcome.staff.role)
        .await?;

    Ok(Json(outcome))
}
