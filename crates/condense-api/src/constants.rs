//! API constants
//!
//! Route prefix shared by the router, the OpenAPI annotations, and the
//! integration tests.

/// Versioned API path prefix.
pub const API_PREFIX: &str = "/api/v0";
