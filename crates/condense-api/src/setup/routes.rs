//! Route configuration and setup.

use crate::api_doc::ApiDoc;
use crate::auth::{auth_middleware, AuthState};
use crate::handlers::{
    extract::extract_text,
    generate::generate_summary,
    pipeline_run::run_pipeline,
    summaries::{get_summary, get_summary_blocks, list_summaries, store_summary},
    upload::upload_file,
};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use condense_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Transport-level body cap. Sized above the per-file upload limit so the
/// validator produces the contract rejection for oversized files; the layer
/// only guards against runaway request bodies.
fn request_body_cap(max_upload_size_bytes: usize) -> usize {
    max_upload_size_bytes * 2 + 64 * 1024
}

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = Arc::new(AuthState {
        jwt_secret: config.jwt_secret.clone(),
    });

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/openapi.json", get(openapi_json));

    let protected_routes = Router::new()
        .route("/api/v0/uploads", post(upload_file))
        .route("/api/v0/summaries", post(store_summary).get(list_summaries))
        .route("/api/v0/summaries/extract", post(extract_text))
        .route("/api/v0/summaries/generate", post(generate_summary))
        .route("/api/v0/summaries/pipeline", post(run_pipeline))
        .route("/api/v0/summaries/{id}", get(get_summary))
        .route("/api/v0/summaries/{id}/blocks", get(get_summary_blocks))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    let app = public_routes
        .merge(protected_routes)
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(RequestBodyLimitLayer::new(request_body_cap(
            config.max_upload_size_bytes,
        )))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();
        CorsLayer::new()
            .allow_origin(origins.map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };

    Ok(cors)
}
