//! Product/inventory service: receipts, allocations, consumption and
//! stock-movement trails
//!
//! `instock` is a high-water mark of everything ever received; stock on
//! hand is derived by subtracting the consumption total at read time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{available_stock, can_consume, ConsumptionRecord, ProductAllocation, StockMovement};
use shared::types::{MovementType, StockStatus};
use shared::validation::{validate_name, validate_quantity};

/// Inventory service for managing products, allocations and consumption
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Input for receiving stock. Product identity is the composite
/// (name, make, model, category) tuple: a receipt for an existing tuple
/// merges into that product.
#[derive(Debug, Deserialize)]
pub struct ReceiveInput {
    pub name: String,
    pub category_id: Uuid,
    pub location_id: Uuid,
    pub make: String,
    pub model: String,
    pub quantity: i64,
}

/// Input for consuming stock
#[derive(Debug, Deserialize)]
pub struct ConsumeInput {
    pub quantity: i64,
    pub from_location_id: Option<Uuid>,
    pub to_location_id: Option<Uuid>,
    pub used_at_location_id: Option<Uuid>,
    pub consumed_by: String,
    pub remarks: Option<String>,
}

/// A product with its derived stock figures
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub make: String,
    pub model: String,
    pub instock: i64,
    pub opening_stock: i64,
    pub min_stock: i64,
    pub consumed_total: i64,
    pub available_stock: i64,
    pub status: StockStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product with its allocations and consumption history
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: ProductView,
    pub allocations: Vec<ProductAllocation>,
    pub consumption_records: Vec<ConsumptionRecord>,
}

/// Result of a successful consumption
#[derive(Debug, Serialize)]
pub struct ConsumeOutcome {
    pub record: ConsumptionRecord,
    pub available_stock: i64,
    pub status: StockStatus,
}

/// Row for product queries with the consumption total joined in
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    category_id: Uuid,
    name: String,
    make: String,
    model: String,
    instock: i64,
    opening_stock: i64,
    min_stock: i64,
    consumed_total: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for ProductView {
    fn from(row: ProductRow) -> Self {
        let available = available_stock(row.instock, row.consumed_total);
        ProductView {
            id: row.id,
            category_id: row.category_id,
            name: row.name,
            make: row.make,
            model: row.model,
            instock: row.instock,
            opening_stock: row.opening_stock,
            min_stock: row.min_stock,
            consumed_total: row.consumed_total,
            available_stock: available,
            status: StockStatus::derive(available, row.min_stock),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Row for consumption-record queries
#[derive(Debug, sqlx::FromRow)]
struct ConsumptionRow {
    id: Uuid,
    product_id: Uuid,
    quantity: i64,
    from_location_id: Option<Uuid>,
    to_location_id: Option<Uuid>,
    used_at_location_id: Option<Uuid>,
    consumed_by: String,
    remarks: Option<String>,
    consumed_at: DateTime<Utc>,
}

impl From<ConsumptionRow> for ConsumptionRecord {
    fn from(row: ConsumptionRow) -> Self {
        ConsumptionRecord {
            id: row.id,
            product_id: row.product_id,
            quantity: row.quantity,
            from_location_id: row.from_location_id,
            to_location_id: row.to_location_id,
            used_at_location_id: row.used_at_location_id,
            consumed_by: row.consumed_by,
            remarks: row.remarks,
            consumed_at: row.consumed_at,
        }
    }
}

/// Row for stock-movement queries
#[derive(Debug, sqlx::FromRow)]
struct MovementRow {
    id: Uuid,
    product_id: Uuid,
    movement_type: String,
    quantity: i64,
    location_id: Option<Uuid>,
    recorded_at: DateTime<Utc>,
}

impl From<MovementRow> for StockMovement {
    fn from(row: MovementRow) -> Self {
        StockMovement {
            id: row.id,
            product_id: row.product_id,
            movement_type: match row.movement_type.as_str() {
                "received" => MovementType::Received,
                _ => MovementType::Consumed,
            },
            quantity: row.quantity,
            location_id: row.location_id,
            recorded_at: row.recorded_at,
        }
    }
}

const SELECT_PRODUCT: &str = r#"
    SELECT p.id, p.category_id, p.name, p.make, p.model, p.instock,
           p.opening_stock, p.min_stock,
           COALESCE(c.total, 0) AS consumed_total,
           p.created_at, p.updated_at
    FROM products p
    LEFT JOIN (
        SELECT product_id, SUM(quantity)::BIGINT AS total
        FROM consumption_records
        GROUP BY product_id
    ) c ON c.product_id = p.id
"#;

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Receive stock: merge into an existing product matching the
    /// (name, make, model, category) tuple or create a new one. The unique
    /// index on the tuple backs the upsert, so concurrent receipts cannot
    /// create duplicate rows.
    pub async fn receive(&self, input: ReceiveInput) -> AppResult<ProductView> {
        let name = validate_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
        })?;
        validate_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;

        // Resolve the category's threshold; doubles as the existence check
        let min_stock = sqlx::query_scalar::<_, i64>(
            "SELECT min_stock FROM categories WHERE id = $1",
        )
        .bind(input.category_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

        let location_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM locations WHERE id = $1)",
        )
        .bind(input.location_id)
        .fetch_one(&self.db)
        .await?;

        if !location_exists {
            return Err(AppError::NotFound("Location".to_string()));
        }

        let mut tx = self.db.begin().await?;

        // Merge-or-create on the composite identity. opening_stock and
        // min_stock keep their original values on merge.
        let product_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO products (category_id, name, make, model, instock, opening_stock, min_stock)
            VALUES ($1, $2, $3, $4, $5, $5, $6)
            ON CONFLICT (category_id, name, make, model)
            DO UPDATE SET instock = products.instock + EXCLUDED.instock,
                          updated_at = NOW()
            RETURNING id
            "#,
        )
        .bind(input.category_id)
        .bind(name)
        .bind(&input.make)
        .bind(&input.model)
        .bind(input.quantity)
        .bind(min_stock)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO product_allocations (product_id, location_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (product_id, location_id)
            DO UPDATE SET quantity = product_allocations.quantity + EXCLUDED.quantity
            "#,
        )
        .bind(product_id)
        .bind(input.location_id)
        .bind(input.quantity)
        .execute(&mut *tx)
        .await?;

        Self::record_movement(
            &mut tx,
            product_id,
            MovementType::Received,
            input.quantity,
            Some(input.location_id),
        )
        .await?;

        tx.commit().await?;

        self.get_view(product_id).await
    }

    /// Consume stock: append an immutable consumption record after checking
    /// the derived available stock. The product row is locked for the check,
    /// so two concurrent consumptions cannot both pass against the same
    /// baseline and overdraw.
    pub async fn consume(&self, product_id: Uuid, input: ConsumeInput) -> AppResult<ConsumeOutcome> {
        validate_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;

        let consumed_by = validate_name(&input.consumed_by).map_err(|msg| AppError::Validation {
            field: "consumed_by".to_string(),
            message: msg.to_string(),
        })?;

        let mut tx = self.db.begin().await?;

        let product = sqlx::query_as::<_, (i64, i64)>(
            "SELECT instock, min_stock FROM products WHERE id = $1 FOR UPDATE",
        )
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let (instock, min_stock) = product;

        let consumed_total = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(quantity), 0)::BIGINT FROM consumption_records WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_one(&mut *tx)
        .await?;

        let available = available_stock(instock, consumed_total);
        if !can_consume(available, input.quantity) {
            return Err(AppError::InsufficientStock(format!(
                "Requested {} but only {} available",
                input.quantity, available
            )));
        }

        let record = sqlx::query_as::<_, ConsumptionRow>(
            r#"
            INSERT INTO consumption_records
                (product_id, quantity, from_location_id, to_location_id,
                 used_at_location_id, consumed_by, remarks)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, product_id, quantity, from_location_id, to_location_id,
                      used_at_location_id, consumed_by, remarks, consumed_at
            "#,
        )
        .bind(product_id)
        .bind(input.quantity)
        .bind(input.from_location_id)
        .bind(input.to_location_id)
        .bind(input.used_at_location_id)
        .bind(consumed_by)
        .bind(&input.remarks)
        .fetch_one(&mut *tx)
        .await?;

        Self::record_movement(
            &mut tx,
            product_id,
            MovementType::Consumed,
            input.quantity,
            input.from_location_id.or(input.used_at_location_id),
        )
        .await?;

        tx.commit().await?;

        let remaining = available - input.quantity;
        Ok(ConsumeOutcome {
            record: record.into(),
            available_stock: remaining,
            status: StockStatus::derive(remaining, min_stock),
        })
    }

    /// List all products with derived stock figures, newest first
    pub async fn list(&self) -> AppResult<Vec<ProductView>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "{} ORDER BY p.created_at DESC",
            SELECT_PRODUCT
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ProductView::from).collect())
    }

    /// Get a product with its allocations and consumption history
    pub async fn get(&self, product_id: Uuid) -> AppResult<ProductDetail> {
        let product = self.get_view(product_id).await?;

        let allocations = sqlx::query_as::<_, (Uuid, String, i64)>(
            r#"
            SELECT pa.location_id, l.name, pa.quantity
            FROM product_allocations pa
            JOIN locations l ON l.id = pa.location_id
            WHERE pa.product_id = $1
            ORDER BY l.name
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(|(location_id, location_name, quantity)| ProductAllocation {
            location_id,
            location_name,
            quantity,
        })
        .collect();

        let records = sqlx::query_as::<_, ConsumptionRow>(
            r#"
            SELECT id, product_id, quantity, from_location_id, to_location_id,
                   used_at_location_id, consumed_by, remarks, consumed_at
            FROM consumption_records
            WHERE product_id = $1
            ORDER BY consumed_at DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(ProductDetail {
            product,
            allocations,
            consumption_records: records.into_iter().map(ConsumptionRecord::from).collect(),
        })
    }

    /// Hard-delete a product. Allocations and consumption records go with
    /// it via FK cascade; stock movements are an independent trail and stay.
    pub async fn delete(&self, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }

    /// List all stock movements, newest first
    pub async fn list_movements(&self) -> AppResult<Vec<StockMovement>> {
        let rows = sqlx::query_as::<_, MovementRow>(
            r#"
            SELECT id, product_id, movement_type, quantity, location_id, recorded_at
            FROM stock_movements
            ORDER BY recorded_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(StockMovement::from).collect())
    }

    /// List stock movements for a product, newest first
    pub async fn movements_for_product(&self, product_id: Uuid) -> AppResult<Vec<StockMovement>> {
        let rows = sqlx::query_as::<_, MovementRow>(
            r#"
            SELECT id, product_id, movement_type, quantity, location_id, recorded_at
            FROM stock_movements
            WHERE product_id = $1
            ORDER BY recorded_at DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(StockMovement::from).collect())
    }

    /// Fetch a single product view
    async fn get_view(&self, product_id: Uuid) -> AppResult<ProductView> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "{} WHERE p.id = $1",
            SELECT_PRODUCT
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(row.into())
    }

    /// Append a stock-movement event inside the caller's transaction
    async fn record_movement(
        tx: &mut Transaction<'_, Postgres>,
        product_id: Uuid,
        movement_type: MovementType,
        quantity: i64,
        location_id: Option<Uuid>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO stock_movements (product_id, movement_type, quantity, location_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(product_id)
        .bind(movement_type.as_str())
        .bind(quantity)
        .bind(location_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
