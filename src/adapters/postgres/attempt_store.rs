//! PostgreSQL implementation of AttemptStore.
//!
//! Persists validation attempts to the `validation_attempts` table. The
//! partial update is a single static statement: every verdict column is
//! wrapped in COALESCE so unpopulated fields keep their stored value.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{AttemptId, DomainError, ErrorCode, Timestamp};
use crate::ports::{AttemptStore, AttemptUpdate, ValidationAttempt};

/// PostgreSQL implementation of AttemptStore.
#[derive(Clone)]
pub struct PostgresAttemptStore {
    pool: PgPool,
}

impl PostgresAttemptStore {
    /// Creates a new PostgresAttemptStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttemptStore for PostgresAttemptStore {
    async fn insert(&self, received_xml: &str) -> Result<AttemptId, DomainError> {
        let id = AttemptId::new();
        let received_at = Timestamp::now();

        sqlx::query(
            r#"
            INSERT INTO validation_attempts (id, received_at, received_xml)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id.as_uuid())
        .bind(received_at.as_datetime())
        .bind(received_xml)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert attempt: {}", e)))?;

        Ok(id)
    }

    async fn update(&self, id: AttemptId, update: AttemptUpdate) -> Result<(), DomainError> {
        if update.is_empty() {
            return Ok(());
        }

        let result = sqlx::query(
            r#"
            UPDATE validation_attempts SET
                schema_valid = COALESCE($2, schema_valid),
                content_valid = COALESCE($3, content_valid),
                ai_analysis = COALESCE($4, ai_analysis),
                response_status = COALESCE($5, response_status)
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(update.schema_valid)
        .bind(update.content_valid)
        .bind(update.ai_analysis)
        .bind(update.response_status)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update attempt: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AttemptNotFound,
                format!("Attempt not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn find(&self, id: AttemptId) -> Result<Option<ValidationAttempt>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, received_at, received_xml, schema_valid, content_valid,
                   ai_analysis, response_status
            FROM validation_attempts
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch attempt: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_attempt(row)?)),
            None => Ok(None),
        }
    }
}

fn row_to_attempt(row: sqlx::postgres::PgRow) -> Result<ValidationAttempt, DomainError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| DomainError::database(format!("Bad id column: {}", e)))?;
    let received_at: chrono::DateTime<chrono::Utc> = row
        .try_get("received_at")
        .map_err(|e| DomainError::database(format!("Bad received_at column: {}", e)))?;
    let received_xml: String = row
        .try_get("received_xml")
        .map_err(|e| DomainError::database(format!("Bad received_xml column: {}", e)))?;
    let schema_valid: Option<bool> = row
        .try_get("schema_valid")
        .map_err(|e| DomainError::database(format!("Bad schema_valid column: {}", e)))?;
    let content_valid: Option<bool> = row
        .try_get("content_valid")
        .map_err(|e| DomainError::database(format!("Bad content_valid column: {}", e)))?;
    let ai_analysis: Option<String> = row
        .try_get("ai_analysis")
        .map_err(|e| DomainError::database(format!("Bad ai_analysis column: {}", e)))?;
    let response_status: Option<i32> = row
        .try_get("response_status")
        .map_err(|e| DomainError::database(format!("Bad response_status column: {}", e)))?;

    Ok(ValidationAttempt {
        id: AttemptId::from_uuid(id),
        received_at: Timestamp::from_datetime(received_at),
        received_xml,
        schema_valid,
        content_valid,
        ai_analysis,
        response_status,
    })
}
