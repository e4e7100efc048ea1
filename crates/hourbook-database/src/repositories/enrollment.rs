//! Enrollment repository and roster queries.

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};

use hourbook_core::error::{AppError, ErrorKind};
use hourbook_core::result::AppResult;
use hourbook_core::types::{EnrollmentId, UserId};
use hourbook_entity::enrollment::{CreateEnrollment, Enrollment};
use hourbook_entity::user::User;

use crate::store::EnrollmentStore;

/// Repository for enrollments.
#[derive(Debug, Clone)]
pub struct EnrollmentRepository {
    pool: PgPool,
}

impl EnrollmentRepository {
    /// Create a new enrollment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Insert an enrollment unless one exists for the same
/// `(volunteer, class, semester)`. Returns whether a row was written.
pub(crate) async fn insert_enrollment(
    executor: impl PgExecutor<'_>,
    data: &CreateEnrollment,
) -> AppResult<bool> {
    let result = sqlx::query(
        "INSERT INTO enrollments \
         (id, volunteer_id, class_name, semester, year, organization, supervisor_id, registration_request_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         ON CONFLICT (volunteer_id, class_name, semester) DO NOTHING",
    )
    .bind(EnrollmentId::new())
    .bind(data.volunteer_id)
    .bind(&data.class_name)
    .bind(&data.semester)
    .bind(data.year)
    .bind(&data.organization)
    .bind(data.supervisor_id)
    .bind(data.registration_request_id)
    .execute(executor)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create enrollment", e))?;

    Ok(result.rows_affected() == 1)
}

#[async_trait]
impl EnrollmentStore for EnrollmentRepository {
    async fn list_for_volunteer(&self, volunteer_id: UserId) -> AppResult<Vec<Enrollment>> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT * FROM enrollments WHERE volunteer_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(volunteer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list enrollments", e))
    }

    async fn is_enrolled(
        &self,
        volunteer_id: UserId,
        class_name: &str,
        semester: &str,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM enrollments \
             WHERE volunteer_id = $1 AND class_name = $2 AND semester = $3)",
        )
        .bind(volunteer_id)
        .bind(class_name)
        .bind(semester)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check enrollment", e))
    }

    async fn volunteers_of_supervisor(&self, supervisor_id: UserId) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT u.* FROM users u WHERE u.id IN \
             (SELECT e.volunteer_id FROM enrollments e WHERE e.supervisor_id = $1) \
             ORDER BY u.last_name, u.first_name",
        )
        .bind(supervisor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list supervised volunteers", e)
        })
    }

    async fn supervisors_of_volunteer(&self, volunteer_id: UserId) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT u.* FROM users u WHERE u.id IN \
             (SELECT e.supervisor_id FROM enrollments e WHERE e.volunteer_id = $1) \
             ORDER BY u.last_name, u.first_name",
        )
        .bind(volunteer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list volunteer supervisors", e)
        })
    }
}
