use crate::auth::models::{CallerIdentity, JwtClaims};
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use condense_core::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::sync::Arc;

/// State for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: String,
}

/// Validate the session token and attach the caller's identity to the
/// request. The identity provider is the source of truth; this middleware
/// only verifies its signature and expiry.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return HttpAppError(AppError::Unauthorized(
            "Invalid authorization header format".to_string(),
        ))
        .into_response();
    };

    let claims = match decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(auth_state.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    ) {
        Ok(data) => data.claims,
        Err(e) => {
            tracing::debug!(error = %e, "Session token rejected");
            return HttpAppError(AppError::Unauthorized(
                "Invalid or expired session token".to_string(),
            ))
            .into_response();
        }
    };

    request.extensions_mut().insert(CallerIdentity {
        external_id: claims.sub,
        email: claims.email,
    });

    next.run(request).await
}
