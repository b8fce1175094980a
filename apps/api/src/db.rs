use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{error, info};

const CREATE_CANDIDATES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS candidates (
    id          UUID PRIMARY KEY,
    document    JSONB NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// Creates the PostgreSQL connection pool backing the candidate store.
///
/// A failed initial connection is logged and the pool falls back to lazy
/// connects, so the process keeps serving (requests answer 500 until the
/// database becomes reachable). Only a malformed URL is an error.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let options = PgPoolOptions::new().max_connections(max_connections);

    match options.clone().connect(database_url).await {
        Ok(pool) => {
            info!("PostgreSQL connection pool established");
            Ok(pool)
        }
        Err(e) => {
            error!("Connection error: {e}");
            options
                .connect_lazy(database_url)
                .context("DATABASE_URL is not a valid PostgreSQL connection string")
        }
    }
}

/// Creates the `candidates` document table if it does not exist yet.
/// Idempotent; run at startup and again before the first query if that failed.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_CANDIDATES_TABLE).execute(pool).await?;
    Ok(())
}
