use crate::auth::CallerIdentity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::pipeline::persist_summary;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use condense_core::models::{StageResult, Summary, SummaryResponse};
use condense_core::AppError;
use condense_processing::{parse_summary, Block};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StoreSummaryRequest {
    /// URL of the uploaded PDF
    #[validate(length(min = 1))]
    pub file_url: String,
    /// Generated summary body
    #[validate(length(min = 1))]
    pub summary: String,
    /// Display title, usually the uploaded filename
    #[validate(length(min = 1))]
    pub title: String,
}

#[utoipa::path(
    post,
    path = "/api/v0/summaries",
    tag = "summaries",
    request_body = StoreSummaryRequest,
    responses(
        (status = 201, description = "Summary persisted", body = SummaryResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No user record for caller", body = ErrorResponse),
        (status = 409, description = "Owner does not resolve to a user", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn store_summary(
    State(state): State<Arc<AppState>>,
    caller: CallerIdentity,
    Json(request): Json<StoreSummaryRequest>,
) -> Result<(StatusCode, Json<StageResult<SummaryResponse>>), HttpAppError> {
    request
        .validate()
        .map_err(AppError::from)
        .map_err(HttpAppError)?;

    let row = persist_summary(
        &state,
        &caller,
        &request.file_url,
        &request.summary,
        &request.title,
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

/// Resolve the caller's internal user id, then fetch one of their summaries.
/// Rows owned by other users read as not found.
async fn fetch_owned_summary(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
) -> Result<Summary, AppError> {
    let user_id = state
        .db
        .users
        .get_id_by_external_id(&caller.external_id)
        .await?
        .ok_or_else(|| {
            AppError::UserNotFound(format!(
                "No user record for identity {}",
                caller.external_id
            ))
        })?;

    let row = state
        .db
        .summaries
        .get_by_id(id)
        .await?
        .filter(|row| row.user_id == user_id)
        .ok_or_else(|| AppError::NotFound(format!("Summary {} not found", id)))?;

    Ok(row)
}

#[utoipa::path(
    get,
    path = "/api/v0/summaries",
    tag = "summaries",
    responses(
        (status = 200, description = "Caller's summaries, newest first", body = [SummaryResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No user record for caller", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_summaries(
    State(state): State<Arc<AppState>>,
    caller: CallerIdentity,
) -> Result<Json<StageResult<Vec<SummaryResponse>>>, HttpAppError> {
    let user_id = state
        .db
        .users
        .get_id_by_external_id(&caller.external_id)
        .await
        .map_err(HttpAppError)?
        .ok_or_else(|| {
            HttpAppError(AppError::UserNotFound(format!(
                "No user record for identity {}",
                caller.external_id
            )))
        })?;

    let rows = state
        .db
        .summaries
        .list_for_user(user_id)
        .await
        .map_err(HttpAppError)?;

    let responses: Vec<SummaryResponse> = rows.into_iter().map(SummaryResponse::from).collect();
    Ok(Json(StageResult::ok("Summaries fetched", responses)))
}

#[utoipa::path(
    get,
    path = "/api/v0/summaries/{id}",
    tag = "summaries",
    params(("id" = Uuid, Path, description = "Summary id")),
    responses(
        (status = 200, description = "Summary", body = SummaryResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<StageResult<SummaryResponse>>, HttpAppError> {
    let row = fetch_owned_summary(&state, &caller, id)
        .await
        .map_err(HttpAppError)?;

    Ok(Json(StageResult::ok(
        "Summary fetched",
        SummaryResponse::from(row),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v0/summaries/{id}/blocks",
    tag = "summaries",
    params(("id" = Uuid, Path, description = "Summary id")),
    responses(
        (status = 200, description = "Rendered block structure", body = [Block]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_summary_blocks(
    State(state): State<Arc<AppState>>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<StageResult<Vec<Block>>>, HttpAppError> {
    let row = fetch_owned_summary(&state, &caller, id)
        .await
        .map_err(HttpAppError)?;

    let blocks = parse_summary(&row.summary);
    Ok(Json(StageResult::ok("Summary rendered", blocks)))
}
