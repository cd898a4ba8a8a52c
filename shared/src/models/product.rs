//! Product and inventory models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{MovementType, StockStatus};

/// A product line tracked in inventory.
///
/// Product identity is the composite (name, make, model, category) tuple:
/// receiving stock for an existing tuple merges into the same product.
/// `instock` is a high-water mark; stock on hand is derived by subtracting
/// the consumption total (see [`available_stock`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub make: String,
    pub model: String,
    /// Total quantity ever received
    pub instock: i64,
    /// Stock level at creation time
    pub opening_stock: i64,
    /// Threshold synced from the owning category
    pub min_stock: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A (location, quantity) pair recording where portions of a product's
/// stock physically reside. Owned by the product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductAllocation {
    pub location_id: Uuid,
    pub location_name: String,
    pub quantity: i64,
}

/// An immutable record of a stock withdrawal. Owned by the product and
/// removed with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i64,
    pub from_location_id: Option<Uuid>,
    pub to_location_id: Option<Uuid>,
    pub used_at_location_id: Option<Uuid>,
    pub consumed_by: String,
    pub remarks: Option<String>,
    pub consumed_at: DateTime<Utc>,
}

/// An append-only stock movement event. Independent of the product row:
/// it survives product deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: i64,
    pub location_id: Option<Uuid>,
    pub recorded_at: DateTime<Utc>,
}

/// Quantity of a product not yet recorded as consumed.
pub fn available_stock(instock: i64, consumed_total: i64) -> i64 {
    instock - consumed_total
}

/// Whether a consumption of `quantity` is allowed against the current
/// available stock. Rejects non-positive quantities.
pub fn can_consume(available: i64, quantity: i64) -> bool {
    quantity > 0 && quantity <= available
}

/// Derive the presentation status for a product.
pub fn product_status(instock: i64, consumed_total: i64, min_stock: i64) -> StockStatus {
    StockStatus::derive(available_stock(instock, consumed_total), min_stock)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_stock_is_derived() {
        assert_eq!(available_stock(10, 7), 3);
        assert_eq!(available_stock(10, 0), 10);
    }

    #[test]
    fn test_can_consume_boundaries() {
        assert!(can_consume(3, 3));
        assert!(!can_consume(3, 4));
        assert!(!can_consume(3, 0));
        assert!(!can_consume(3, -1));
    }

    #[test]
    fn test_product_status_scenario() {
        // receive 10, min_stock 5
        assert_eq!(product_status(10, 0, 5), StockStatus::Available);
        // consume 7 -> 3 <= 5
        assert_eq!(product_status(10, 7, 5), StockStatus::LowStock);
        // consume everything
        assert_eq!(product_status(10, 10, 5), StockStatus::OutOfStock);
    }
}
