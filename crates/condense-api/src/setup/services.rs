//! Service initialization and application state setup

use anyhow::Result;
use condense_core::Config;
use condense_db::{SummaryRepository, UserRepository};
use condense_processing::PdfTextExtractor;
use condense_services::{GeminiService, SummaryProvider};
use condense_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

use crate::state::{AppState, DbState, UploadLimits};

/// Initialize all services and repositories, returning the application state
pub async fn initialize_services(
    config: &Config,
    pool: PgPool,
    storage: Arc<dyn Storage>,
) -> Result<Arc<AppState>> {
    let db = DbState {
        pool: pool.clone(),
        users: UserRepository::new(pool.clone()),
        summaries: SummaryRepository::new(pool),
    };

    let summarizer: Arc<dyn SummaryProvider> = Arc::new(GeminiService::new(
        config.gemini_api_key.clone().unwrap_or_default(),
        config.gemini_model.clone(),
    ));

    let upload = UploadLimits {
        max_file_size: config.max_upload_size_bytes,
        allowed_extensions: config.allowed_extensions.clone(),
        allowed_content_types: config.allowed_content_types.clone(),
    };

    let is_production = config.is_production();

    Ok(Arc::new(AppState {
        db,
        storage,
        summarizer,
        extractor: PdfTextExtractor::new(),
        upload,
        config: config.clone(),
        is_production,
    }))
}
