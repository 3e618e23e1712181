use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reference to a file handed to the storage collaborator.
///
/// Produced by the upload stage, consumed by the extraction and persistence
/// stages. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StoredFileReference {
    pub url: String,
    pub name: String,
}
