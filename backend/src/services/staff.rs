//! Staff account management service

use bcrypt::{hash, DEFAULT_COST};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Staff;
use shared::types::StaffRole;
use shared::validation::{validate_email, validate_password, validate_username};

/// Staff service for account CRUD
#[derive(Clone)]
pub struct StaffService {
    db: PgPool,
}

/// Input for creating a staff account
#[derive(Debug, Deserialize)]
pub struct CreateStaffInput {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub role: Option<StaffRole>,
}

/// Input for partially updating a staff account
#[derive(Debug, Deserialize)]
pub struct UpdateStaffInput {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub role: Option<StaffRole>,
}

impl UpdateStaffInput {
    fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.email.is_none()
            && self.role.is_none()
    }
}

/// Row for staff queries; the hash column is selected only where needed
#[derive(Debug, sqlx::FromRow)]
struct StaffRow {
    id: Uuid,
    username: String,
    email: Option<String>,
    role: String,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<StaffRow> for Staff {
    fn from(row: StaffRow) -> Self {
        Staff {
            id: row.id,
            username: row.username,
            email: row.email,
            role: StaffRole::parse(&row.role),
            last_login_at: row.last_login_at,
            created_at: row.created_at,
        }
    }
}

const SELECT_STAFF: &str =
    "SELECT id, username, email, role, last_login_at, created_at FROM staff";

impl StaffService {
    /// Create a new StaffService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a staff account. The password is one-way hashed before
    /// storage; usernames are unique.
    pub async fn create(&self, input: CreateStaffInput) -> AppResult<Staff> {
        validate_username(&input.username).map_err(|msg| AppError::Validation {
            field: "username".to_string(),
            message: msg.to_string(),
        })?;
        validate_password(&input.password).map_err(|msg| AppError::Validation {
            field: "password".to_string(),
            message: msg.to_string(),
        })?;
        if let Some(ref email) = input.email {
            validate_email(email).map_err(|msg| AppError::Validation {
                field: "email".to_string(),
                message: msg.to_string(),
            })?;
        }

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM staff WHERE username = $1",
        )
        .bind(&input.username)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("username".to_string()));
        }

        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let role = input.role.unwrap_or_default();

        let staff = sqlx::query_as::<_, StaffRow>(
            r#"
            INSERT INTO staff (username, password_hash, email, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, role, last_login_at, created_at
            "#,
        )
        .bind(&input.username)
        .bind(&password_hash)
        .bind(&input.email)
        .bind(role.as_str())
        .fetch_one(&self.db)
        .await?;

        Ok(staff.into())
    }

    /// List all staff accounts, newest first
    pub async fn list(&self) -> AppResult<Vec<Staff>> {
        let staff =
            sqlx::query_as::<_, StaffRow>(&format!("{} ORDER BY created_at DESC", SELECT_STAFF))
                .fetch_all(&self.db)
                .await?;

        Ok(staff.into_iter().map(Staff::from).collect())
    }

    /// Get a staff account by id
    pub async fn get(&self, staff_id: Uuid) -> AppResult<Staff> {
        let staff = sqlx::query_as::<_, StaffRow>(&format!("{} WHERE id = $1", SELECT_STAFF))
            .bind(staff_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Staff".to_string()))?;

        Ok(staff.into())
    }

    /// Partially update a staff account. The password is re-hashed when
    /// changed; an update with no recognized field is rejected.
    pub async fn update(&self, staff_id: Uuid, input: UpdateStaffInput) -> AppResult<Staff> {
        if input.is_empty() {
            return Err(AppError::ValidationError(
                "No recognized field to update".to_string(),
            ));
        }

        let existing = sqlx::query_as::<_, StaffRow>(&format!("{} WHERE id = $1", SELECT_STAFF))
            .bind(staff_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Staff".to_string()))?;

        if let Some(ref username) = input.username {
            validate_username(username).map_err(|msg| AppError::Validation {
                field: "username".to_string(),
                message: msg.to_string(),
            })?;

            let duplicate = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM staff WHERE username = $1 AND id != $2",
            )
            .bind(username)
            .bind(staff_id)
            .fetch_one(&self.db)
            .await?;

            if duplicate > 0 {
                return Err(AppError::DuplicateEntry("username".to_string()));
            }
        }

        let password_hash = match input.password {
            Some(ref password) => {
                validate_password(password).map_err(|msg| AppError::Validation {
                    field: "password".to_string(),
                    message: msg.to_string(),
                })?;
                Some(
                    hash(password, DEFAULT_COST)
                        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?,
                )
            }
            None => None,
        };

        if let Some(ref email) = input.email {
            validate_email(email).map_err(|msg| AppError::Validation {
                field: "email".to_string(),
                message: msg.to_string(),
            })?;
        }

        let username = input.username.unwrap_or(existing.username);
        let email = input.email.or(existing.email);
        let role = input
            .role
            .unwrap_or_else(|| StaffRole::parse(&existing.role));

        let staff = sqlx::query_as::<_, StaffRow>(
            r#"
            UPDATE staff
            SET username = $1,
                email = $2,
                role = $3,
                password_hash = COALESCE($4, password_hash)
            WHERE id = $5
            RETURNING id, username, email, role, last_login_at, created_at
            "#,
        )
        .bind(&username)
        .bind(&email)
        .bind(role.as_str())
        .bind(&password_hash)
        .bind(staff_id)
        .fetch_one(&self.db)
        .await?;

        Ok(staff.into())
    }

    /// Hard-delete a staff account
    pub async fn delete(&self, staff_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM staff WHERE id = $1")
            .bind(staff_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Staff".to_string()));
        }

        Ok(())
    }
}
