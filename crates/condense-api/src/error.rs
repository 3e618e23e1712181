//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`.
//! Use `AppError` (or types that implement `Into<AppError>`) for errors and
//! `.map_err(Into::into)` so they render consistently: the uniform
//! `{ success, message }` envelope with the variant's status code, plus a
//! machine-readable `code`. Technical detail is logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use condense_core::{AppError, ErrorMetadata, LogLevel};
use condense_processing::{ExtractError, ValidationError};
use condense_services::SummarizeError;
use condense_storage::StorageError;
use serde::Serialize;
use utoipa::ToSchema;

/// Failure envelope: `success` is always false, `message` is the short
/// user-displayable text, `code` is the machine-readable error kind.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse.
/// Necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from condense-core).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error.detailed_message(), error_type = error_type, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            success: false,
            message: app_error.client_message(),
            code: app_error.error_code().to_string(),
        });

        (status, body).into_response()
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(storage_to_app_error(err))
    }
}

/// Storage collaborator failures surface as `UploadFailed`; they are never
/// silently swallowed.
pub fn storage_to_app_error(err: StorageError) -> AppError {
    match err {
        StorageError::NotFound(msg) => AppError::NotFound(msg),
        StorageError::UploadFailed(msg) => AppError::UploadFailed(msg),
        StorageError::DownloadFailed(msg) => AppError::UploadFailed(msg),
        StorageError::DeleteFailed(msg) => AppError::UploadFailed(msg),
        StorageError::InvalidKey(msg) => AppError::Validation(msg),
        StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
        StorageError::ConfigError(msg) => AppError::Internal(msg),
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        HttpAppError(validation_to_app_error(err))
    }
}

/// Upload validation failures are user-facing rejections; the message names
/// what was wrong with the file.
pub fn validation_to_app_error(err: ValidationError) -> AppError {
    match err {
        ValidationError::FileTooLarge { size, max } => AppError::Validation(format!(
            "File too large: {} bytes exceeds the {} byte limit",
            size, max
        )),
        ValidationError::InvalidExtension { extension, allowed } => AppError::Validation(format!(
            "Invalid file extension '{}', allowed: {}",
            extension,
            allowed.join(", ")
        )),
        ValidationError::InvalidContentType {
            content_type,
            allowed,
        } => AppError::Validation(format!(
            "Invalid content type '{}', allowed: {}",
            content_type,
            allowed.join(", ")
        )),
        ValidationError::InvalidFilename(msg) => AppError::Validation(msg),
        ValidationError::EmptyFile => AppError::Validation("File is empty".to_string()),
    }
}

impl From<ExtractError> for HttpAppError {
    fn from(err: ExtractError) -> Self {
        HttpAppError(extract_to_app_error(err))
    }
}

/// Extraction failures collapse into the fetch/no-text pair the pipeline
/// reports; library parse errors read as "no text" to the caller.
pub fn extract_to_app_error(err: ExtractError) -> AppError {
    match err {
        ExtractError::Fetch(msg) => AppError::FetchFailed(format!("Failed to fetch PDF: {}", msg)),
        ExtractError::NoText => AppError::NoTextExtracted(
            "No text could be extracted from the PDF. Please ensure the PDF contains readable text."
                .to_string(),
        ),
        ExtractError::Parse(msg) => {
            AppError::NoTextExtracted(format!("No text could be extracted from the PDF: {}", msg))
        }
        ExtractError::Io(err) => AppError::Internal(format!("IO error: {}", err)),
    }
}

impl From<SummarizeError> for HttpAppError {
    fn from(err: SummarizeError) -> Self {
        HttpAppError(summarize_to_app_error(err))
    }
}

pub fn summarize_to_app_error(err: SummarizeError) -> AppError {
    AppError::SummarizationFailed(format!("Summarization failed: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_error_upload_failed() {
        let storage_err = StorageError::UploadFailed("disk full".to_string());
        let HttpAppError(app_err) = storage_err.into();
        match app_err {
            AppError::UploadFailed(msg) => assert_eq!(msg, "disk full"),
            _ => panic!("Expected UploadFailed variant"),
        }
    }

    #[test]
    fn test_from_storage_error_not_found() {
        let storage_err = StorageError::NotFound("uploads/x.pdf".to_string());
        let HttpAppError(app_err) = storage_err.into();
        assert!(matches!(app_err, AppError::NotFound(_)));
    }

    #[test]
    fn test_from_validation_error_file_too_large() {
        let validation_err = ValidationError::FileTooLarge {
            size: 15_728_640,
            max: 10_485_760,
        };
        let HttpAppError(app_err) = validation_err.into();
        match app_err {
            AppError::Validation(msg) => {
                assert!(msg.contains("15728640"));
                assert!(msg.contains("10485760"));
            }
            _ => panic!("Expected Validation variant"),
        }
    }

    #[test]
    fn test_from_extract_error_fetch() {
        let HttpAppError(app_err) = ExtractError::Fetch("status 404".to_string()).into();
        match app_err {
            AppError::FetchFailed(msg) => assert!(msg.contains("404")),
            _ => panic!("Expected FetchFailed variant"),
        }
    }

    #[test]
    fn test_from_extract_error_no_text() {
        let HttpAppError(app_err) = ExtractError::NoText.into();
        assert!(matches!(app_err, AppError::NoTextExtracted(_)));
    }

    #[test]
    fn test_from_summarize_error() {
        let HttpAppError(app_err) = SummarizeError("model timed out".to_string()).into();
        match app_err {
            AppError::SummarizationFailed(msg) => assert!(msg.contains("model timed out")),
            _ => panic!("Expected SummarizationFailed variant"),
        }
    }

    /// The public failure contract: `{ success: false, message, code }`.
    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            success: false,
            message: "User not found".to_string(),
            code: "USER_NOT_FOUND".to_string(),
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json.get("success"), Some(&serde_json::json!(false)));
        assert_eq!(
            json.get("code").and_then(|v| v.as_str()),
            Some("USER_NOT_FOUND")
        );
        assert!(json.get("message").and_then(|v| v.as_str()).is_some());
    }
}
