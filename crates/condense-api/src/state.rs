//! Application state and sub-state extractors.
//!
//! AppState is built once at startup and passed explicitly; handlers extract
//! the sub-state they need via Axum's `FromRef` instead of reaching for
//! hidden globals.

use condense_core::Config;
use condense_db::{SummaryRepository, UserRepository};
use condense_processing::PdfTextExtractor;
use condense_services::SummaryProvider;
use condense_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

// ----- Sub-state types -----

/// Database pool and repositories.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub users: UserRepository,
    pub summaries: SummaryRepository,
}

/// Upload limits enforced in front of the storage collaborator.
#[derive(Clone, Debug)]
pub struct UploadLimits {
    pub max_file_size: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
}

// ----- AppState -----

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub storage: Arc<dyn Storage>,
    pub summarizer: Arc<dyn SummaryProvider>,
    pub extractor: PdfTextExtractor,
    pub upload: UploadLimits,
    pub config: Config,
    pub is_production: bool,
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for UploadLimits {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.upload.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
