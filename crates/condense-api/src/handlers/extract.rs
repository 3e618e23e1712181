use crate::auth::CallerIdentity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::pipeline::{SummaryPipeline, TracingObserver};
use crate::state::AppState;
use axum::{extract::State, Json};
use condense_core::models::StageResult;
use condense_core::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ExtractRequest {
    /// URL of the stored PDF to extract text from
    #[validate(length(min = 1))]
    pub file_url: String,
}

#[utoipa::path(
    post,
    path = "/api/v0/summaries/extract",
    tag = "summaries",
    request_body = ExtractRequest,
    responses(
        (status = 200, description = "Text extracted", body = String),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 422, description = "No extractable text", body = ErrorResponse),
        (status = 502, description = "Fetch failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn extract_text(
    State(state): State<Arc<AppState>>,
    _caller: CallerIdentity,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<StageResult<String>>, HttpAppError> {
    request
        .validate()
        .map_err(AppError::from)
        .map_err(HttpAppError)?;

    let pipeline = SummaryPipeline::new(state, Arc::new(TracingObserver));
    let text = pipeline
        .extraction_stage(&request.file_url)
        .await
        .map_err(HttpAppError)?;

    Ok(Json(StageResult::ok("Text extracted successfully", text)))
}
