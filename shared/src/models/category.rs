//! Category models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product category with its make/model enumerations and the
/// minimum-stock threshold propagated to its products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    /// Ordered, duplicate-free (case-sensitive) list of makes
    pub makes: Vec<String>,
    /// Ordered, duplicate-free (case-sensitive) list of models
    pub models: Vec<String>,
    pub min_stock: i64,
    pub created_at: DateTime<Utc>,
}
