use condense_core::models::User;
use condense_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

/// Read-side repository over the users table. Users are provisioned by the
/// identity sync; this flow only resolves them.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve the internal user id for an identity-provider id.
    pub async fn get_id_by_external_id(&self, external_id: &str) -> Result<Option<Uuid>, AppError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id
            FROM users
            WHERE external_id = $1
            "#,
        )
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user by external id: {}", e);
            AppError::Datastore(e.to_string())
        })?;

        Ok(id)
    }

    /// Fetch a full user record by external id.
    pub async fn get_by_external_id(&self, external_id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, external_id, email, created_at, updated_at
            FROM users
            WHERE external_id = $1
            "#,
        )
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user by external id: {}", e);
            AppError::Datastore(e.to_string())
        })?;

        Ok(user)
    }
}
