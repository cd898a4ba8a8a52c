//! Liveness endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Report server liveness and database reachability. Degrades rather
/// than errors when Postgres is unreachable, so monitoring can tell the
/// two failure modes apart.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_reachable = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();

    let (status, database) = if database_reachable {
        ("ok", "connected")
    } else {
        ("degraded", "unreachable")
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })
}
