use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Status written by the pipeline; the column admits further states later.
pub const STATUS_COMPLETED: &str = "completed";

/// Persisted summary record. Owned by the datastore once inserted; the
/// pipeline is insert-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Summary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub pdf_url: String,
    pub summary: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    pub id: Uuid,
    pub title: String,
    pub pdf_url: String,
    pub summary: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Summary> for SummaryResponse {
    fn from(row: Summary) -> Self {
        SummaryResponse {
            id: row.id,
            title: row.title,
            pdf_url: row.pdf_url,
            summary: row.summary,
            status: row.status,
            created_at: row.created_at,
        }
    }
}
