//! Storage location handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::CurrentStaff;
use crate::services::LocationService;
use crate::AppState;
use crate::models::Location;

#[derive(Deserialize)]
pub struct CreateLocationRequest {
    pub name: String,
}

/// List all locations, most recently created first
pub async fn list_locations(
    State(state): State<AppState>,
    CurrentStaff(_current): CurrentStaff,
) -> Result<Json<Vec<Location>>, AppError> {
    let service = LocationService::new(state.db.clone());
    let locations = service.list().await?;

    Ok(Json(locations))
}

/// Get a location by id
pub async fn get_location(
    State(state): State<AppState>,
    CurrentStaff(_current): CurrentStaff,
    Path(location_id): Path<Uuid>,
) -> Result<Json<Location>, AppError> {
    let service = LocationService::new(state.db.clone());
    let location = service.get(location_id).await?;

    Ok(Json(location))
}

/// Create a location
pub async fn create_location(
    State(state): State<AppState>,
    CurrentStaff(_current): CurrentStaff,
    Json(body): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<Location>), AppError> {
    let service = LocationService::new(state.db.clone());
    let location = service.create(&body.name).await?;

    Ok((StatusCode::CREATED, Json(location)))
}
