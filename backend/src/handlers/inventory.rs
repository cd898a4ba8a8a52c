//! HTTP handlers for product and inventory endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::CurrentStaff;
use crate::services::inventory::{
    ConsumeInput, ConsumeOutcome, InventoryService, ProductDetail, ProductView, ReceiveInput,
};
use crate::AppState;
use crate::models::StockMovement;

/// List all products with derived available stock and status
pub async fn list_products(
    State(state): State<AppState>,
    CurrentStaff(_current): CurrentStaff,
) -> Result<Json<Vec<ProductView>>, AppError> {
    let service = InventoryService::new(state.db.clone());
    let products = service.list().await?;

    Ok(Json(products))
}

/// Get a product with its allocations and consumption history
pub async fn get_product(
    State(state): State<AppState>,
    CurrentStaff(_current): CurrentStaff,
    Path(product_id): Path<Uuid>,
) -> Result<Json<ProductDetail>, AppError> {
    let service = InventoryService::new(state.db.clone());
    let product = service.get(product_id).await?;

    Ok(Json(product))
}

/// Receive stock: merge into an existing product line or create a new one
pub async fn receive_product(
    State(state): State<AppState>,
    CurrentStaff(_current): CurrentStaff,
    Json(input): Json<ReceiveInput>,
) -> Result<(StatusCode, Json<ProductView>), AppError> {
    let service = InventoryService::new(state.db.clone());
    let product = service.receive(input).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Consume stock against a product
pub async fn consume_product(
    State(state): State<AppState>,
    CurrentStaff(_current): CurrentStaff,
    Path(product_id): Path<Uuid>,
    Json(input): Json<ConsumeInput>,
) -> Result<Json<ConsumeOutcome>, AppError> {
    let service = InventoryService::new(state.db.clone());
    let outcome = service.consume(product_id, input).await?;

    Ok(Json(outcome))
}

/// Delete a product (admin only). Its embedded allocation and consumption
/// history disappears with it; stock movements remain.
pub async fn delete_product(
    State(state): State<AppState>,
    CurrentStaff(current): CurrentStaff,
    Path(product_id): Path<Uuid>,
) -> Result<Json<()>, AppError> {
    if !current.is_admin() {
        return Err(AppError::InsufficientPermissions);
    }

    let service = InventoryService::new(state.db.clone());
    service.delete(product_id).await?;

    Ok(Json(()))
}

/// List all stock movements, newest first
pub async fn list_movements(
    State(state): State<AppState>,
    CurrentStaff(_current): CurrentStaff,
) -> Result<Json<Vec<StockMovement>>, AppError> {
    let service = InventoryService::new(state.db.clone());
    let movements = service.list_movements().await?;

    Ok(Json(movements))
}

/// List stock movements for a product, newest first
pub async fn get_product_movements(
    State(state): State<AppState>,
    CurrentStaff(_current): CurrentStaff,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Vec<StockMovement>>, AppError> {
    let service = InventoryService::new(state.db.clone());
    let movements = service.movements_for_product(product_id).await?;

    Ok(Json(movements))
}
