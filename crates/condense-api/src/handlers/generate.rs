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
pub struct GenerateRequest {
    /// Extracted PDF text to summarize
    #[validate(length(min = 1))]
    pub text: String,
}

#[utoipa::path(
    post,
    path = "/api/v0/summaries/generate",
    tag = "summaries",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Summary generated", body = String),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "Generative model failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn generate_summary(
    State(state): State<Arc<AppState>>,
    _caller: CallerIdentity,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<StageResult<String>>, HttpAppError> {
    request
        .validate()
        .map_err(AppError::from)
        .map_err(HttpAppError)?;

    let pipeline = SummaryPipeline::new(state, Arc::new(TracingObserver));
    let summary = pipeline
        .summarization_stage(&request.text)
        .await
        .map_err(HttpAppError)?;

    Ok(Json(StageResult::ok(
        "Summary generated successfully",
        summary,
    )))
}
