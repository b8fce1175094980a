//! Candidate persistence.
//!
//! `CandidateStore` is the seam between the service and the document store.
//! `PgCandidateStore` keeps each candidate as a JSONB document keyed by UUID.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::candidates::models::{Candidate, CandidateRecord};
use crate::db::ensure_schema;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

/// Document-store operations consumed by `CandidateService`.
/// Documents handed to the store have already passed validation.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn insert(&self, candidate: Candidate) -> Result<CandidateRecord, StoreError>;

    /// All documents in insertion order.
    async fn find_all(&self) -> Result<Vec<CandidateRecord>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CandidateRecord>, StoreError>;

    /// Overwrites only the top-level fields in `fields`, atomically, leaving
    /// the rest of the stored document as it is at write time.
    /// `None` when no document has `id`.
    async fn update_by_id(
        &self,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<Option<CandidateRecord>, StoreError>;

    /// `false` when no document has `id`.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Releases connections. Called once after the server stops accepting requests.
    async fn close(&self);
}

#[derive(Debug, FromRow)]
struct CandidateRow {
    id: Uuid,
    document: Json<Candidate>,
}

impl From<CandidateRow> for CandidateRecord {
    fn from(row: CandidateRow) -> Self {
        CandidateRecord {
            id: row.id,
            candidate: row.document.0,
        }
    }
}

pub struct PgCandidateStore {
    pool: PgPool,
    schema_ready: OnceCell<()>,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema_ready: OnceCell::new(),
        }
    }

    /// Prepares the table eagerly at startup. A failure is logged and left to
    /// the first store call to retry.
    pub async fn prepare(&self) {
        if let Err(e) = self.ready().await {
            error!("Failed to prepare candidates table: {e}");
        }
    }

    /// Creates the table on first use. Retried on later calls until it succeeds,
    /// which covers a database that was unreachable at startup.
    async fn ready(&self) -> Result<&PgPool, StoreError> {
        self.schema_ready
            .get_or_try_init(|| async {
                ensure_schema(&self.pool).await?;
                debug!("candidates table ready");
                Ok::<(), StoreError>(())
            })
            .await?;
        Ok(&self.pool)
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn insert(&self, candidate: Candidate) -> Result<CandidateRecord, StoreError> {
        let pool = self.ready().await?;
        let id = Uuid::new_v4();

        sqlx::query("INSERT INTO candidates (id, document) VALUES ($1, $2)")
            .bind(id)
            .bind(Json(&candidate))
            .execute(pool)
            .await?;

        Ok(CandidateRecord { id, candidate })
    }

    async fn find_all(&self) -> Result<Vec<CandidateRecord>, StoreError> {
        let pool = self.ready().await?;
        let rows = sqlx::query_as::<_, CandidateRow>(
            "SELECT id, document FROM candidates ORDER BY created_at, id",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(CandidateRecord::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CandidateRecord>, StoreError> {
        let pool = self.ready().await?;
        let row = sqlx::query_as::<_, CandidateRow>(
            "SELECT id, document FROM candidates WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(CandidateRecord::from))
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<Option<CandidateRecord>, StoreError> {
        let pool = self.ready().await?;
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            UPDATE candidates
            SET document = document || $2, updated_at = now()
            WHERE id = $1
            RETURNING id, document
            "#,
        )
        .bind(id)
        .bind(Json(Value::Object(fields)))
        .fetch_optional(pool)
        .await?;
        Ok(row.map(CandidateRecord::from))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let pool = self.ready().await?;
        let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL connection pool closed");
    }
}
