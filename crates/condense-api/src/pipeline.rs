//! Four-stage summary pipeline: upload → extract → summarize → persist.
//!
//! The stage functions are pure request/response plumbing over the
//! collaborators; notification is a separate concern behind
//! [`PipelineObserver`] so the UI layer (or the log) subscribes to stage
//! transitions instead of being interleaved with the business logic.

use std::fmt;
use std::sync::Arc;

use condense_core::models::{StoredFileReference, Summary};
use condense_core::AppError;
use condense_processing::{sanitize_filename, UploadValidator};
use condense_storage::ProgressCallback;

use crate::auth::CallerIdentity;
use crate::error::{
    extract_to_app_error, storage_to_app_error, summarize_to_app_error, validation_to_app_error,
};
use crate::state::AppState;

/// One sequential step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Upload,
    Extraction,
    Summarization,
    Persistence,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Upload => write!(f, "upload"),
            Stage::Extraction => write!(f, "extraction"),
            Stage::Summarization => write!(f, "summarization"),
            Stage::Persistence => write!(f, "persistence"),
        }
    }
}

/// Subscriber for stage transitions and upload progress.
pub trait PipelineObserver: Send + Sync {
    fn stage_started(&self, _stage: Stage) {}
    fn stage_completed(&self, _stage: Stage) {}
    fn stage_failed(&self, _stage: Stage, _message: &str) {}
    /// Upload progress percentage, 0–100 inclusive, monotone per upload.
    fn upload_progress(&self, _percent: u8) {}
}

/// Default observer: stage transitions go to the structured log.
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn stage_started(&self, stage: Stage) {
        tracing::info!(stage = %stage, "Stage started");
    }

    fn stage_completed(&self, stage: Stage) {
        tracing::info!(stage = %stage, "Stage completed");
    }

    fn stage_failed(&self, stage: Stage, message: &str) {
        tracing::warn!(stage = %stage, message = %message, "Stage failed");
    }

    fn upload_progress(&self, percent: u8) {
        tracing::info!(percent = percent, "Upload progress");
    }
}

/// Validated multipart payload entering the pipeline.
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

/// Sequential pipeline runner. One call = one request; stages never run in
/// parallel and an earlier failure short-circuits the rest. The uploaded
/// file is left in place when a later stage fails.
pub struct SummaryPipeline {
    state: Arc<AppState>,
    observer: Arc<dyn PipelineObserver>,
}

impl SummaryPipeline {
    pub fn new(state: Arc<AppState>, observer: Arc<dyn PipelineObserver>) -> Self {
        Self { state, observer }
    }

    pub async fn run(
        &self,
        caller: &CallerIdentity,
        file: UploadedFile,
    ) -> Result<Summary, AppError> {
        let stored = self.upload_stage(file).await?;
        let text = self.extraction_stage(&stored.url).await?;
        let summary = self.summarization_stage(&text).await?;
        self.persistence_stage(caller, &stored, &summary).await
    }

    fn observe<T>(&self, stage: Stage, result: Result<T, AppError>) -> Result<T, AppError> {
        use condense_core::ErrorMetadata;
        match &result {
            Ok(_) => self.observer.stage_completed(stage),
            Err(e) => self.observer.stage_failed(stage, &e.client_message()),
        }
        result
    }

    /// Validate then hand the file to the storage collaborator. A rejected
    /// file performs no storage call.
    pub async fn upload_stage(&self, file: UploadedFile) -> Result<StoredFileReference, AppError> {
        self.observer.stage_started(Stage::Upload);
        let result = self.upload_inner(file).await;
        self.observe(Stage::Upload, result)
    }

    async fn upload_inner(&self, file: UploadedFile) -> Result<StoredFileReference, AppError> {
        let limits = &self.state.upload;
        let validator = UploadValidator::new(
            limits.max_file_size,
            limits.allowed_extensions.clone(),
            limits.allowed_content_types.clone(),
        );
        validator
            .validate_all(&file.filename, &file.content_type, file.data.len())
            .map_err(validation_to_app_error)?;
        let safe_name = sanitize_filename(&file.filename).map_err(validation_to_app_error)?;

        let observer = self.observer.clone();
        let on_progress: ProgressCallback = Arc::new(move |percent| {
            observer.upload_progress(percent);
        });

        let (_key, url) = self
            .state
            .storage
            .upload(&safe_name, &file.content_type, file.data, Some(on_progress))
            .await
            .map_err(storage_to_app_error)?;

        Ok(StoredFileReference {
            url,
            name: safe_name,
        })
    }

    pub async fn extraction_stage(&self, file_url: &str) -> Result<String, AppError> {
        self.observer.stage_started(Stage::Extraction);
        let result = self
            .state
            .extractor
            .extract_from_url(file_url)
            .await
            .map_err(extract_to_app_error);
        self.observe(Stage::Extraction, result)
    }

    pub async fn summarization_stage(&self, text: &str) -> Result<String, AppError> {
        self.observer.stage_started(Stage::Summarization);
        let result = self
            .state
            .summarizer
            .summarize(text)
            .await
            .map_err(summarize_to_app_error);
        self.observe(Stage::Summarization, result)
    }

    pub async fn persistence_stage(
        &self,
        caller: &CallerIdentity,
        stored: &StoredFileReference,
        summary: &str,
    ) -> Result<Summary, AppError> {
        self.observer.stage_started(Stage::Persistence);
        let result = persist_summary(&self.state, caller, &stored.url, summary, &stored.name).await;
        self.observe(Stage::Persistence, result)
    }
}

/// Persistence stage shared by the pipeline and the store endpoint:
/// validate required fields, resolve the caller's user record, insert one
/// completed summary row.
pub async fn persist_summary(
    state: &AppState,
    caller: &CallerIdentity,
    file_url: &str,
    summary: &str,
    title: &str,
) -> Result<Summary, AppError> {
    if file_url.trim().is_empty() || summary.trim().is_empty() || title.trim().is_empty() {
        return Err(AppError::Validation("Missing required fields".to_string()));
    }

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

    state
        .db
        .summaries
        .insert(user_id, title, file_url, summary)
        .await
}
