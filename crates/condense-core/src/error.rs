//! Error types module
//!
//! This module provides the core error taxonomy used throughout the Condense
//! application. Every pipeline stage converts its collaborator's failure into
//! one of the `AppError` kinds below, so stage boundaries handle a closed set
//! of cases instead of opaque error strings.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for collaborator rejections worth noticing
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented.
/// This trait allows errors to self-describe their HTTP response characteristics.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "FETCH_FAILED")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("No text extracted: {0}")]
    NoTextExtracted(String),

    #[error("Summarization failed: {0}")]
    SummarizationFailed(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Referential integrity violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Datastore error: {0}")]
    Datastore(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

// Error conversion implementations following Rust best practices

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON parsing error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Validation(format!("UUID parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = err
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        if fields.is_empty() {
            AppError::Validation(format!("Validation error: {}", err))
        } else {
            AppError::Validation(format!(
                "Missing or invalid required fields: {}",
                fields.join(", ")
            ))
        }
    }
}

/// Catch-all for sqlx failures that reach the boundary without a
/// context-specific mapping (repositories map 23503 themselves).
#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Datastore(err.to_string())
    }
}

/// Static metadata for each variant: (http_status, error_code, sensitive, log_level).
/// client_message stays per-variant for dynamic content.
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::Unauthorized(_) => (401, "UNAUTHORIZED", false, LogLevel::Debug),
        AppError::Validation(_) => (400, "VALIDATION_ERROR", false, LogLevel::Debug),
        AppError::UploadFailed(_) => (502, "UPLOAD_FAILED", false, LogLevel::Warn),
        AppError::FetchFailed(_) => (502, "FETCH_FAILED", false, LogLevel::Warn),
        AppError::NoTextExtracted(_) => (422, "NO_TEXT_EXTRACTED", false, LogLevel::Debug),
        AppError::SummarizationFailed(_) => (502, "SUMMARIZATION_FAILED", false, LogLevel::Warn),
        AppError::UserNotFound(_) => (404, "USER_NOT_FOUND", false, LogLevel::Debug),
        AppError::NotFound(_) => (404, "NOT_FOUND", false, LogLevel::Debug),
        AppError::ForeignKeyViolation(_) => (409, "FOREIGN_KEY_VIOLATION", false, LogLevel::Warn),
        AppError::Datastore(_) => (500, "DATASTORE_ERROR", false, LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Validation(_) => "Validation",
            AppError::UploadFailed(_) => "UploadFailed",
            AppError::FetchFailed(_) => "FetchFailed",
            AppError::NoTextExtracted(_) => "NoTextExtracted",
            AppError::SummarizationFailed(_) => "SummarizationFailed",
            AppError::UserNotFound(_) => "UserNotFound",
            AppError::NotFound(_) => "NotFound",
            AppError::ForeignKeyViolation(_) => "ForeignKeyViolation",
            AppError::Datastore(_) => "Datastore",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Unauthorized(ref msg) => msg.clone(),
            AppError::Validation(ref msg) => msg.clone(),
            AppError::UploadFailed(ref msg) => msg.clone(),
            AppError::FetchFailed(ref msg) => msg.clone(),
            AppError::NoTextExtracted(ref msg) => msg.clone(),
            AppError::SummarizationFailed(ref msg) => msg.clone(),
            AppError::UserNotFound(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::ForeignKeyViolation(ref msg) => msg.clone(),
            // The persistence contract reports unknown datastore errors with
            // their raw message.
            AppError::Datastore(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_unauthorized() {
        let err = AppError::Unauthorized("User not authenticated".to_string());
        assert_eq!(err.http_status_code(), 401);
        assert_eq!(err.error_code(), "UNAUTHORIZED");
        assert_eq!(err.client_message(), "User not authenticated");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_fetch_failed() {
        let err = AppError::FetchFailed("status 404".to_string());
        assert_eq!(err.http_status_code(), 502);
        assert_eq!(err.error_code(), "FETCH_FAILED");
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_error_metadata_foreign_key_violation() {
        let err = AppError::ForeignKeyViolation("summaries_user_id_fkey".to_string());
        assert_eq!(err.http_status_code(), 409);
        assert_eq!(err.error_code(), "FOREIGN_KEY_VIOLATION");
        assert!(err.client_message().contains("summaries_user_id_fkey"));
    }

    #[test]
    fn test_error_metadata_datastore_reports_raw_message() {
        let err = AppError::Datastore("connection reset by peer".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DATASTORE_ERROR");
        assert_eq!(err.client_message(), "connection reset by peer");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_internal_hides_detail_from_client() {
        let err = AppError::Internal("tempdir exhausted".to_string());
        assert_eq!(err.client_message(), "Internal server error");
        assert!(err.is_sensitive());
    }

    #[test]
    fn test_validation_errors_conversion_lists_fields() {
        use validator::Validate;

        #[derive(Validate)]
        struct Req {
            #[validate(length(min = 1))]
            title: String,
        }

        let req = Req {
            title: String::new(),
        };
        let err: AppError = req.validate().unwrap_err().into();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("title")),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let source = anyhow::anyhow!("root cause");
        let err = AppError::InternalWithSource {
            message: "wrapper".to_string(),
            source,
        };
        assert!(err.detailed_message().contains("root cause"));
    }
}
