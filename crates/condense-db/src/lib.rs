//! Condense database layer.
//!
//! Thin repositories over `sqlx::PgPool`. The pipeline uses exactly two
//! operations: the user lookup by external id and the summaries insert;
//! reads exist for the dashboard endpoints.

pub mod db;

pub use db::{SummaryRepository, UserRepository};
