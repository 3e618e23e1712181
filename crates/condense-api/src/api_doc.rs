//! OpenAPI document for the Condense API.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error::ErrorResponse;
use crate::handlers::extract::ExtractRequest;
use crate::handlers::generate::GenerateRequest;
use crate::handlers::summaries::StoreSummaryRequest;
use condense_core::models::{StoredFileReference, SummaryResponse};
use condense_processing::{Block, Inline};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::upload::upload_file,
        crate::handlers::extract::extract_text,
        crate::handlers::generate::generate_summary,
        crate::handlers::summaries::store_summary,
        crate::handlers::summaries::list_summaries,
        crate::handlers::summaries::get_summary,
        crate::handlers::summaries::get_summary_blocks,
        crate::handlers::pipeline_run::run_pipeline,
    ),
    components(schemas(
        ErrorResponse,
        ExtractRequest,
        GenerateRequest,
        StoreSummaryRequest,
        StoredFileReference,
        SummaryResponse,
        Block,
        Inline,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "uploads", description = "PDF upload stage"),
        (name = "summaries", description = "Extraction, summarization, and persistence")
    ),
    info(
        title = "Condense API",
        description = "Upload a PDF, extract its text, summarize it with a generative model, and persist the summary."
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
