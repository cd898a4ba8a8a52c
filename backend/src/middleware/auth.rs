//! Authentication middleware
//!
//! JWT authentication and role-based access control middleware

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use shared::types::StaffRole;

use crate::error::ErrorResponse;
use crate::AppState;

/// Authenticated staff information extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthStaff {
    pub staff_id: uuid::Uuid,
    pub username: String,
    pub role: StaffRole,
}

impl AuthStaff {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Authentication middleware that validates JWT tokens.
/// Verification uses the same configured secret the login path signs
/// with, so the two can never diverge.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    let claims = match decode_jwt(token, &state.config.jwt.secret) {
        Ok(claims) => claims,
        Err(msg) => {
            return unauthorized_response(&msg);
        }
    };

    // Parse the staff id from claims
    let staff_id = match uuid::Uuid::parse_str(&claims.sub) {
        Ok(id) => id,
        Err(_) => return unauthorized_response("Invalid staff ID in token"),
    };

    // Create AuthStaff and insert into request extensions
    let auth_staff = AuthStaff {
        staff_id,
        username: claims.username,
        role: StaffRole::parse(&claims.role),
    };

    request.extensions_mut().insert(auth_staff);

    next.run(request).await
}

/// JWT claims structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct Claims {
    sub: String,
    username: String,
    role: String,
    exp: i64,
    iat: i64,
}

/// Decode and validate JWT token
fn decode_jwt(token: &str, secret: &str) -> Result<Claims, String> {
    use jsonwebtoken::{decode, DecodingKey, Validation};

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

/// Create unauthorized response
fn unauthorized_response(message: &str) -> Response {
    let error = ErrorResponse {
        error: crate::error::ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message: message.to_string(),
            field: None,
        },
    };

    (StatusCode::UNAUTHORIZED, Json(error)).into_response()
}

/// Extractor for the authenticated staff member
/// Use this in handlers to get the current user
#[derive(Clone, Debug)]
pub struct CurrentStaff(pub AuthStaff);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentStaff
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthStaff>()
            .cloned()
            .map(CurrentStaff)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: crate::error::ErrorDetail {
                        code: "UNAUTHORIZED".to_string(),
                        message: "Authentication required".to_string(),
                        field: None,
                    },
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token_signed_with(secret: &str) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: uuid::Uuid::new_v4().to_string(),
            username: "warehouse.lead".to_string(),
            role: "staff".to_string(),
            exp: now + 3600,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    /// Signing and verification must agree on one secret: a token signed
    /// with the configured secret passes, any other secret fails.
    #[test]
    fn test_decode_accepts_matching_secret_only() {
        let token = token_signed_with("configured-secret");

        let claims = decode_jwt(&token, "configured-secret").unwrap();
        assert_eq!(claims.username, "warehouse.lead");
        assert_eq!(claims.role, "staff");

        assert!(decode_jwt(&token, "other-secret").is_err());
    }
}
