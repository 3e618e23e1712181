//! JWT minting for tests (identity/session collaborator stand-in).

use condense_api::auth::JwtClaims;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

/// Test signing secret (must match the test config's jwt_secret).
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";

/// Mint a valid session token for the given external identity id.
pub fn mint_token(external_id: &str) -> String {
    let claims = JwtClaims {
        sub: external_id.to_string(),
        email: Some(format!("{}@example.com", external_id)),
        exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp(),
        iat: Some(chrono::Utc::now().timestamp()),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to mint test token")
}
