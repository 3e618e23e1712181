use condense_core::models::{Summary, STATUS_COMPLETED};
use condense_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository over the summaries table. The pipeline is insert-only; reads
/// exist for the dashboard and the rendered-blocks endpoint.
#[derive(Clone)]
pub struct SummaryRepository {
    pool: PgPool,
}

impl SummaryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert one summary row with status fixed to `completed`.
    ///
    /// A foreign-key violation (the resolved user id is invalid at insert
    /// time) is reported as a distinct, user-displayable error; any other
    /// datastore error carries its raw message.
    pub async fn insert(
        &self,
        user_id: Uuid,
        title: &str,
        pdf_url: &str,
        summary: &str,
    ) -> Result<Summary, AppError> {
        let row = sqlx::query_as::<_, Summary>(
            r#"
            INSERT INTO summaries (user_id, title, pdf_url, summary, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, pdf_url, summary, status, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(pdf_url)
        .bind(summary)
        .bind(STATUS_COMPLETED)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23503") => {
                tracing::warn!(user_id = %user_id, "Summary insert rejected by foreign key");
                AppError::ForeignKeyViolation(
                    "Summary owner does not resolve to an existing user".to_string(),
                )
            }
            _ => {
                tracing::error!("Failed to insert summary: {}", e);
                AppError::Datastore(e.to_string())
            }
        })?;

        tracing::info!(summary_id = %row.id, user_id = %user_id, "Summary persisted");
        Ok(row)
    }

    /// Get one summary by id.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Summary>, AppError> {
        let row = sqlx::query_as::<_, Summary>(
            r#"
            SELECT id, user_id, title, pdf_url, summary, status, created_at, updated_at
            FROM summaries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch summary by id: {}", e);
            AppError::Datastore(e.to_string())
        })?;

        Ok(row)
    }

    /// List a user's summaries, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Summary>, AppError> {
        let rows = sqlx::query_as::<_, Summary>(
            r#"
            SELECT id, user_id, title, pdf_url, summary, status, created_at, updated_at
            FROM summaries
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list summaries: {}", e);
            AppError::Datastore(e.to_string())
        })?;

        Ok(rows)
    }

    /// Count all summaries (test support for no-insert properties).
    pub async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM summaries")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Datastore(e.to_string()))?;
        Ok(count)
    }
}
