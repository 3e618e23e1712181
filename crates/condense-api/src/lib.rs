//! Condense API Library
//!
//! This crate provides the HTTP API handlers, middleware, and application setup.

// Module declarations
mod api_doc;
pub mod constants;
pub mod handlers;
pub mod telemetry;
mod utils;

// Public modules
pub mod auth;
pub mod error;
pub mod pipeline;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use pipeline::{PipelineObserver, Stage, SummaryPipeline, TracingObserver};
