//! Staff account models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::StaffRole;

/// A staff account. The password hash is never part of this model;
/// it stays inside the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub role: StaffRole,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
