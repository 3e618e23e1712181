use crate::error::ErrorResponse;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

/// JWT claims issued by the identity/session provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// External identity id of the caller
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// expiration timestamp
    pub exp: i64,
    /// issued at timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Caller identity extracted from the session token and stored in request
/// extensions. Carries the identity-provider id, not an internal user id;
/// the persistence stage resolves the internal record.
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    pub external_id: String,
    pub email: Option<String>,
}

// Implement FromRequestParts for CallerIdentity to work with Multipart.
// Extension cannot be used with Multipart, so we extract directly from
// request parts.
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerIdentity>()
            .cloned()
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        success: false,
                        message: "Unauthorized: User not authenticated".to_string(),
                        code: "UNAUTHORIZED".to_string(),
                    }),
                )
            })
    }
}
