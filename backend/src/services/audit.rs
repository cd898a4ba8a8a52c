//! Append-only audit log service for login events

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use shared::models::AuditLog;
use shared::types::StaffRole;

/// Audit log service: write-once, read-many
#[derive(Clone)]
pub struct AuditLogService {
    db: PgPool,
}

/// Row for audit log queries
#[derive(Debug, sqlx::FromRow)]
struct AuditLogRow {
    id: Uuid,
    user_id: Uuid,
    username: String,
    role: String,
    logged_in_at: DateTime<Utc>,
}

impl From<AuditLogRow> for AuditLog {
    fn from(row: AuditLogRow) -> Self {
        AuditLog {
            id: row.id,
            user_id: row.user_id,
            username: row.username,
            role: StaffRole::parse(&row.role),
            logged_in_at: row.logged_in_at,
        }
    }
}

impl AuditLogService {
    /// Create a new AuditLogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Append a login event with the server timestamp
    pub async fn record(
        &self,
        user_id: Uuid,
        username: &str,
        role: StaffRole,
    ) -> AppResult<AuditLog> {
        let log = sqlx::query_as::<_, AuditLogRow>(
            r#"
            INSERT INTO audit_logs (user_id, username, role)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, username, role, logged_in_at
            "#,
        )
        .bind(user_id)
        .bind(username)
        .bind(role.as_str())
        .fetch_one(&self.db)
        .await?;

        Ok(log.into())
    }

    /// List login events for one user, newest first
    pub async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<AuditLog>> {
        let logs = sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT id, user_id, username, role, logged_in_at
            FROM audit_logs
            WHERE user_id = $1
            ORDER BY logged_in_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(logs.into_iter().map(AuditLog::from).collect())
    }

    /// List all login events, newest first
    pub async fn list_all(&self) -> AppResult<Vec<AuditLog>> {
        let logs = sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT id, user_id, username, role, logged_in_at
            FROM audit_logs
            ORDER BY logged_in_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(logs.into_iter().map(AuditLog::from).collect())
    }
}
