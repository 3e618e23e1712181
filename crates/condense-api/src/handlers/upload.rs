use crate::auth::CallerIdentity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::pipeline::{SummaryPipeline, TracingObserver, UploadedFile};
use crate::state::AppState;
use crate::utils::extract_multipart_file;
use axum::{
    extract::{Multipart, State},
    Json,
};
use condense_core::models::{StageResult, StoredFileReference};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/v0/uploads",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded", body = StoredFileReference),
        (status = 400, description = "Invalid file", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 502, description = "Storage collaborator failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    _caller: CallerIdentity,
    multipart: Multipart,
) -> Result<Json<StageResult<StoredFileReference>>, HttpAppError> {
    let (data, filename, content_type) =
        extract_multipart_file(multipart).await.map_err(HttpAppError)?;

    let pipeline = SummaryPipeline::new(state, Arc::new(TracingObserver));
    let stored = pipeline
        .upload_stage(UploadedFile {
            data,
            filename,
            content_type,
        })
        .await
        .map_err(HttpAppError)?;

    Ok(Json(StageResult::ok("Upload complete", stored)))
}
