//! Storage location service

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Location;
use shared::validation::validate_name;

/// Location service for managing named storage locations
#[derive(Clone)]
pub struct LocationService {
    db: PgPool,
}

/// Row for location queries
#[derive(Debug, sqlx::FromRow)]
struct LocationRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Location {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

impl LocationService {
    /// Create a new LocationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a location. The name is trimmed; blank names are rejected
    /// and duplicate trimmed names conflict.
    pub async fn create(&self, name: &str) -> AppResult<Location> {
        let trimmed = validate_name(name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
        })?;

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM locations WHERE name = $1",
        )
        .bind(trimmed)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::Conflict {
                resource: "location".to_string(),
                message: "Location with this name already exists".to_string(),
            });
        }

        let location = sqlx::query_as::<_, LocationRow>(
            r#"
            INSERT INTO locations (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(trimmed)
        .fetch_one(&self.db)
        .await?;

        Ok(location.into())
    }

    /// List all locations, most recently created first
    pub async fn list(&self) -> AppResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, LocationRow>(
            r#"
            SELECT id, name, created_at
            FROM locations
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(locations.into_iter().map(Location::from).collect())
    }

    /// Look up a location by id
    pub async fn get(&self, location_id: Uuid) -> AppResult<Location> {
        let location = sqlx::query_as::<_, LocationRow>(
            "SELECT id, name, created_at FROM locations WHERE id = $1",
        )
        .bind(location_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Location".to_string()))?;

        Ok(location.into())
    }
}
