//! Category service for make/model enumerations and minimum-stock thresholds

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Category;
use shared::validation::{dedupe_preserving_order, push_unique, remove_value, validate_name};

/// Category service for managing categories and cascading updates
#[derive(Clone)]
pub struct CategoryService {
    db: PgPool,
}

/// Input for creating a category
#[derive(Debug, Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
    #[serde(default)]
    pub makes: Vec<String>,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default)]
    pub min_stock: i64,
}

/// Row for category queries
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    makes: Vec<String>,
    models: Vec<String>,
    min_stock: i64,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            makes: row.makes,
            models: row.models,
            min_stock: row.min_stock,
            created_at: row.created_at,
        }
    }
}

const SELECT_CATEGORY: &str =
    "SELECT id, name, makes, models, min_stock, created_at FROM categories";

impl CategoryService {
    /// Create a new CategoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a category. Fails with a conflict when the name already
    /// exists (case-sensitive); input make/model lists are de-duplicated
    /// preserving order.
    pub async fn create(&self, input: CreateCategoryInput) -> AppResult<Category> {
        let name = validate_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
        })?;

        if input.min_stock < 0 {
            return Err(AppError::Validation {
                field: "min_stock".to_string(),
                message: "Minimum stock must not be negative".to_string(),
            });
        }

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM categories WHERE name = $1",
        )
        .bind(name)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::Conflict {
                resource: "category".to_string(),
                message: "Category with this name already exists".to_string(),
            });
        }

        let makes = dedupe_preserving_order(input.makes);
        let models = dedupe_preserving_order(input.models);

        let category = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name, makes, models, min_stock)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, makes, models, min_stock, created_at
            "#,
        )
        .bind(name)
        .bind(&makes)
        .bind(&models)
        .bind(input.min_stock)
        .fetch_one(&self.db)
        .await?;

        Ok(category.into())
    }

    /// List all categories, newest first
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, CategoryRow>(&format!("{} ORDER BY created_at DESC", SELECT_CATEGORY))
                .fetch_all(&self.db)
                .await?;

        Ok(categories.into_iter().map(Category::from).collect())
    }

    /// Get a category by id
    pub async fn get(&self, category_id: Uuid) -> AppResult<Category> {
        let category =
            sqlx::query_as::<_, CategoryRow>(&format!("{} WHERE id = $1", SELECT_CATEGORY))
                .bind(category_id)
                .fetch_optional(&self.db)
                .await?
                .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

        Ok(category.into())
    }

    /// Add a make to a category. No-op when the make is already present.
    pub async fn add_make(&self, category_id: Uuid, make: &str) -> AppResult<Category> {
        self.mutate_list(category_id, make, ListField::Makes, ListOp::Add)
            .await
    }

    /// Remove a make from a category (filter-based, removes every occurrence)
    pub async fn remove_make(&self, category_id: Uuid, make: &str) -> AppResult<Category> {
        self.mutate_list(category_id, make, ListField::Makes, ListOp::Remove)
            .await
    }

    /// Add a model to a category. No-op when the model is already present.
    pub async fn add_model(&self, category_id: Uuid, model: &str) -> AppResult<Category> {
        self.mutate_list(category_id, model, ListField::Models, ListOp::Add)
            .await
    }

    /// Remove a model from a category
    pub async fn remove_model(&self, category_id: Uuid, model: &str) -> AppResult<Category> {
        self.mutate_list(category_id, model, ListField::Models, ListOp::Remove)
            .await
    }

    /// Update the minimum-stock threshold and fan it out to every product
    /// in the category. The category write and the product fan-out run in
    /// one transaction so a crash cannot leave them out of sync.
    pub async fn update_min_stock(&self, category_id: Uuid, min_stock: i64) -> AppResult<Category> {
        if min_stock < 0 {
            return Err(AppError::Validation {
                field: "min_stock".to_string(),
                message: "Minimum stock must not be negative".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let category = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET min_stock = $1
            WHERE id = $2
            RETURNING id, name, makes, models, min_stock, created_at
            "#,
        )
        .bind(min_stock)
        .bind(category_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

        let updated = sqlx::query(
            "UPDATE products SET min_stock = $1, updated_at = NOW() WHERE category_id = $2",
        )
        .bind(min_stock)
        .bind(category_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            "min_stock cascade updated {} products in category {}",
            updated.rows_affected(),
            category_id
        );

        Ok(category.into())
    }

    /// Delete a category and every product referencing it. Allocations and
    /// consumption records go with their products via FK cascade. The two
    /// deletes run in one transaction.
    pub async fn delete(&self, category_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM products WHERE category_id = $1")
            .bind(category_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category".to_string()));
        }

        tx.commit().await?;

        Ok(())
    }

    /// Shared read-modify-write for the make/model lists. The row is locked
    /// so two concurrent list mutations cannot lose each other's entries.
    async fn mutate_list(
        &self,
        category_id: Uuid,
        value: &str,
        field: ListField,
        op: ListOp,
    ) -> AppResult<Category> {
        let value = validate_name(value).map_err(|msg| AppError::Validation {
            field: field.column().to_string(),
            message: msg.to_string(),
        })?;

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "{} WHERE id = $1 FOR UPDATE",
            SELECT_CATEGORY
        ))
        .bind(category_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

        let mut category: Category = row.into();
        let list = match field {
            ListField::Makes => &mut category.makes,
            ListField::Models => &mut category.models,
        };

        let changed = match op {
            ListOp::Add => push_unique(list, value.to_string()),
            ListOp::Remove => remove_value(list, value),
        };

        if changed {
            sqlx::query(&format!(
                "UPDATE categories SET {} = $1 WHERE id = $2",
                field.column()
            ))
            .bind(match field {
                ListField::Makes => &category.makes,
                ListField::Models => &category.models,
            })
            .bind(category_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(category)
    }
}

#[derive(Clone, Copy)]
enum ListField {
    Makes,
    Models,
}

impl ListField {
    fn column(&self) -> &'static str {
        match self {
            ListField::Makes => "makes",
            ListField::Models => "models",
        }
    }
}

#[derive(Clone, Copy)]
enum ListOp {
    Add,
    Remove,
}
