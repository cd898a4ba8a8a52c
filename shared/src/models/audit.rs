//! Audit log models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::StaffRole;

/// An append-only record of a login event. Write-once, read-many.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub role: StaffRole,
    pub logged_in_at: DateTime<Utc>,
}
