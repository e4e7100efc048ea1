//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use hourbook_core::error::{AppError, ErrorKind};

/// Run all pending database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations...");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database migrations completed successfully");
    Ok(())
}

/// Number of migrations embedded in this build.
pub fn embedded_count() -> usize {
    sqlx::migrate!("../../migrations").iter().count()
}

/// Number of migrations recorded as applied. Zero on a fresh database.
pub async fn applied_count(pool: &PgPool) -> Result<i64, AppError> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = '_sqlx_migrations')",
    )
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to inspect migrations", e))?;

    if !exists {
        return Ok(0);
    }

    sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count migrations", e))
}
