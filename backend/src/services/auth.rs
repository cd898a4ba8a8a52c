//! Authentication service for staff login and token management
//!
//! Every account, including the seeded administrator, goes through the
//! same bcrypt hashing and verification path.

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::{AdminConfig, Config};
use crate::error::{AppError, AppResult};
use shared::models::Staff;
use shared::types::StaffRole;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Result of a successful login
#[derive(Debug, Serialize)]
pub struct LoginOutcome {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub staff: Staff,
}

/// Staff row including the password hash; never leaves this module
#[derive(Debug, sqlx::FromRow)]
struct StaffAuthRow {
    id: Uuid,
    username: String,
    password_hash: String,
    email: Option<String>,
    role: String,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl StaffAuthRow {
    fn into_staff(self) -> Staff {
        Staff {
            id: self.id,
            username: self.username,
            email: self.email,
            role: StaffRole::parse(&self.role),
            last_login_at: self.last_login_at,
            created_at: self.created_at,
        }
    }
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
        }
    }

    /// Authenticate a staff member with username and password.
    /// Updates the last-login timestamp on success.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        let row = sqlx::query_as::<_, StaffAuthRow>(
            r#"
            SELECT id, username, password_hash, email, role, last_login_at, created_at
            FROM staff
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        let valid = verify(password, &row.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let last_login = sqlx::query_scalar::<_, DateTime<Utc>>(
            "UPDATE staff SET last_login_at = NOW() WHERE id = $1 RETURNING last_login_at",
        )
        .bind(row.id)
        .fetch_one(&self.db)
        .await?;

        let mut staff = row.into_staff();
        staff.last_login_at = Some(last_login);

        let access_token = self.generate_token(&staff)?;

        Ok(LoginOutcome {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
            staff,
        })
    }

    /// Validate an access token and return its claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }

    /// Seed the privileged account at startup. Idempotent: no-op when the
    /// username already exists. The password is hashed exactly like any
    /// other staff password.
    pub async fn ensure_admin_account(&self, admin: &AdminConfig) -> AppResult<()> {
        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM staff WHERE username = $1",
        )
        .bind(&admin.username)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Ok(());
        }

        if admin.password == "change-me" {
            tracing::warn!(
                "Seeding admin account '{}' with the default password; set ASTRA__ADMIN__PASSWORD",
                admin.username
            );
        }

        let password_hash = hash(&admin.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO staff (username, password_hash, email, role)
            VALUES ($1, $2, $3, 'admin')
            "#,
        )
        .bind(&admin.username)
        .bind(&password_hash)
        .bind(&admin.email)
        .execute(&self.db)
        .await?;

        tracing::info!("Seeded admin account '{}'", admin.username);

        Ok(())
    }

    /// Generate an access token for a staff member
    fn generate_token(&self, staff: &Staff) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.access_token_expiry);

        let claims = Claims {
            sub: staff.id.to_string(),
            username: staff.username.clone(),
            role: staff.role.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff_fixture() -> Staff {
        Staff {
            id: Uuid::new_v4(),
            username: "gyro.admin".to_string(),
            email: None,
            role: StaffRole::Admin,
            last_login_at: None,
            created_at: Utc::now(),
        }
    }

    fn service_fixture() -> AuthService {
        AuthService {
            db: PgPool::connect_lazy("postgres://localhost/astra_test").unwrap(),
            jwt_secret: "test-secret".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[tokio::test]
    async fn test_token_round_trip() {
        let service = service_fixture();
        let staff = staff_fixture();

        let token = service.generate_token(&staff).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, staff.id.to_string());
        assert_eq!(claims.username, "gyro.admin");
        assert_eq!(claims.role, "admin");
    }

    #[tokio::test]
    async fn test_token_rejected_with_wrong_secret() {
        let service = service_fixture();
        let staff = staff_fixture();
        let token = service.generate_token(&staff).unwrap();

        let other = AuthService {
            jwt_secret: "other-secret".to_string(),
            ..service
        };
        assert!(other.validate_token(&token).is_err());
    }
}
