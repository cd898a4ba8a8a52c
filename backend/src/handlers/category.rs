//! Category management handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::CurrentStaff;
use crate::services::category::CreateCategoryInput;
use crate::services::CategoryService;
use crate::AppState;
use crate::models::Category;

#[derive(Deserialize)]
pub struct MakeRequest {
    pub make: String,
}

#[derive(Deserialize)]
pub struct ModelRequest {
    pub model: String,
}

#[derive(Deserialize)]
pub struct MinStockRequest {
    pub min_stock: i64,
}

/// List all categories
pub async fn list_categories(
    State(state): State<AppState>,
    CurrentStaff(_current): CurrentStaff,
) -> Result<Json<Vec<Category>>, AppError> {
    let service = CategoryService::new(state.db.clone());
    let categories = service.list().await?;

    Ok(Json(categories))
}

/// Get a category by id
pub async fn get_category(
    State(state): State<AppState>,
    CurrentStaff(_current): CurrentStaff,
    Path(category_id): Path<Uuid>,
) -> Result<Json<Category>, AppError> {
    let service = CategoryService::new(state.db.clone());
    let category = service.get(category_id).await?;

    Ok(Json(category))
}

/// Create a category (admin only)
pub async fn create_category(
    State(state): State<AppState>,
    CurrentStaff(current): CurrentStaff,
    Json(input): Json<CreateCategoryInput>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    if !current.is_admin() {
        return Err(AppError::InsufficientPermissions);
    }

    let service = CategoryService::new(state.db.clone());
    let category = service.create(input).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Delete a category and every product referencing it (admin only)
pub async fn delete_category(
    State(state): State<AppState>,
    CurrentStaff(current): CurrentStaff,
    Path(category_id): Path<Uuid>,
) -> Result<Json<()>, AppError> {
    if !current.is_admin() {
        return Err(AppError::InsufficientPermissions);
    }

    let service = CategoryService::new(state.db.clone());
    service.delete(category_id).await?;

    Ok(Json(()))
}

/// Update the minimum-stock threshold, cascading to products (admin only)
pub async fn update_min_stock(
    State(state): State<AppState>,
    CurrentStaff(current): CurrentStaff,
    Path(category_id): Path<Uuid>,
    Json(body): Json<MinStockRequest>,
) -> Result<Json<Category>, AppError> {
    if !current.is_admin() {
        return Err(AppError::InsufficientPermissions);
    }

    let service = CategoryService::new(state.db.clone());
    let category = service.update_min_stock(category_id, body.min_stock).await?;

    Ok(Json(category))
}

/// Add a make to a category (admin only, idempotent)
pub async fn add_make(
    State(state): State<AppState>,
    CurrentStaff(current): CurrentStaff,
    Path(category_id): Path<Uuid>,
    Json(body): Json<MakeRequest>,
) -> Result<Json<Category>, AppError> {
    if !current.is_admin() {
        return Err(AppError::InsufficientPermissions);
    }

    let service = CategoryService::new(state.db.clone());
    let category = service.add_make(category_id, &body.make).await?;

    Ok(Json(category))
}

/// Remove a make from a category (admin only)
pub async fn remove_make(
    State(state): State<AppState>,
    CurrentStaff(current): CurrentStaff,
    Path(category_id): Path<Uuid>,
    Json(body): Json<MakeRequest>,
) -> Result<Json<Category>, AppError> {
    if !current.is_admin() {
        return Err(AppError::InsufficientPermissions);
    }

    let service = CategoryService::new(state.db.clone());
    let category = service.remove_make(category_id, &body.make).await?;

    Ok(Json(category))
}

/// Add a model to a category (admin only, idempotent)
pub async fn add_model(
    State(state): State<AppState>,
    CurrentStaff(current): CurrentStaff,
    Path(category_id): Path<Uuid>,
    Json(body): Json<ModelRequest>,
) -> Result<Json<Category>, AppError> {
    if !current.is_admin() {
        return Err(AppError::InsufficientPermissions);
    }

    let service = CategoryService::new(state.db.clone());
    let category = service.add_model(category_id, &body.model).await?;

    Ok(Json(category))
}

/// Remove a model from a category (admin only)
pub async fn remove_model(
    State(state): State<AppState>,
    CurrentStaff(current): CurrentStaff,
    Path(category_id): Path<Uuid>,
    Json(body): Json<ModelRequest>,
) -> Result<Json<Category>, AppError> {
    if !current.is_admin() {
        return Err(AppError::InsufficientPermissions);
    }

    let service = CategoryService::new(state.db.clone());
    let category = service.remove_model(category_id, &body.model).await?;

    Ok(Json(category))
}
