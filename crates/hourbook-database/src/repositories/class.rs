//! Class catalog repository.

use async_trait::async_trait;
use sqlx::PgPool;

use hourbook_core::error::{AppError, ErrorKind};
use hourbook_core::result::AppResult;
use hourbook_core::types::ClassId;
use hourbook_entity::class::{Class, CreateClass};

use crate::store::ClassStore;

/// Repository for the class catalog.
#[derive(Debug, Clone)]
pub struct ClassRepository {
    pool: PgPool,
}

impl ClassRepository {
    /// Create a new class repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassStore for ClassRepository {
    async fn create(&self, data: &CreateClass) -> AppResult<Class> {
        sqlx::query_as::<_, Class>(
            "INSERT INTO classes (id, class_name, hour_requirement) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(ClassId::new())
        .bind(&data.class_name)
        .bind(data.hour_requirement)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("classes_class_name_key") =>
            {
                AppError::conflict(format!("Class '{}' already exists", data.class_name))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create class", e),
        })
    }

    async fn find_by_name(&self, class_name: &str) -> AppResult<Option<Class>> {
        sqlx::query_as::<_, Class>("SELECT * FROM classes WHERE LOWER(class_name) = LOWER($1)")
            .bind(class_name.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find class", e))
    }

    async fn list(&self) -> AppResult<Vec<Class>> {
        sqlx::query_as::<_, Class>("SELECT * FROM classes ORDER BY class_name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list classes", e))
    }
}
