use crate::auth::CallerIdentity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::pipeline::{SummaryPipeline, TracingObserver, UploadedFile};
use crate::state::AppState;
use crate::utils::extract_multipart_file;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use condense_core::models::{StageResult, SummaryResponse};
use std::sync::Arc;

/// Full chain in one request: upload → extract → summarize → persist.
/// An earlier stage's failure short-circuits the rest; the uploaded file is
/// left in place on downstream failure.
#[utoipa::path(
    post,
    path = "/api/v0/summaries/pipeline",
    tag = "summaries",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Summary persisted", body = SummaryResponse),
        (status = 400, description = "Invalid file or fields", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No user record for caller", body = ErrorResponse),
        (status = 422, description = "No extractable text", body = ErrorResponse),
        (status = 502, description = "A collaborator failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn run_pipeline(
    State(state): State<Arc<AppState>>,
    caller: CallerIdentity,
    multipart: Multipart,
) -> Result<(StatusCode, Json<StageResult<SummaryResponse>>), HttpAppError> {
    let (data, filename, content_type) =
        extract_multipart_file(multipart).await.map_err(HttpAppError)?;

    let pipeline = SummaryPipeline::new(state, Arc::new(TracingObserver));
    let row = pipeline
        .run(
            &caller,
            UploadedFile {
                data,
                filename,
                content_type,
            },
        )
        .await
        .map_err(HttpAppError)?;

    Ok((
        StatusCode::CREATED,
        Json(StageResult::ok(
            "Summary saved successfully",
            SummaryResponse::from(row),
        )),
    ))
}
