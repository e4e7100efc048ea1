//! Registration request repository.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use hourbook_core::error::{AppError, ErrorKind};
use hourbook_core::result::AppResult;
use hourbook_core::types::RegistrationRequestId;
use hourbook_core::types::pagination::{PageRequest, PageResponse};
use hourbook_entity::registration::{
    CreateRegistrationRequest, RegistrationQuery, RegistrationRequest, RegistrationStatus,
};

use super::enrollment::insert_enrollment;
use super::notification::insert_notification;
use crate::store::{RegistrationStore, RegistrationTransition};

const FILTER: &str = "($1::uuid IS NULL OR volunteer_id = $1) \
     AND ($2::uuid IS NULL OR supervisor_id = $2) \
     AND ($3::registration_status IS NULL OR status = $3) \
     AND ($4::text IS NULL OR LOWER(course_name) = LOWER($4)) \
     AND ($5::text IS NULL OR semester = $5)";

/// Repository for registration requests.
#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    /// Create a new registration repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationStore for RegistrationRepository {
    async fn create(&self, data: &CreateRegistrationRequest) -> AppResult<RegistrationRequest> {
        sqlx::query_as::<_, RegistrationRequest>(
            "INSERT INTO registration_requests \
             (id, volunteer_id, volunteer_email, first_name, last_name, course_name, semester, \
              year, organization, supervisor_id, supervisor_email, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(RegistrationRequestId::new())
        .bind(data.volunteer_id)
        .bind(&data.volunteer_email)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.course_name)
        .bind(&data.semester)
        .bind(data.year)
        .bind(&data.organization)
        .bind(data.supervisor_id)
        .bind(&data.supervisor_email)
        .bind(RegistrationStatus::PendingSupervisorApproval)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("registration_requests_open_key") =>
            {
                AppError::conflict(format!(
                    "An open registration request for {} in {} already exists",
                    data.course_name, data.semester
                ))
            }
            _ => AppError::with_source(
                ErrorKind::Database,
                "Failed to create registration request",
                e,
            ),
        })
    }

    async fn find_by_id(
        &self,
        id: RegistrationRequestId,
    ) -> AppResult<Option<RegistrationRequest>> {
        sqlx::query_as::<_, RegistrationRequest>(
            "SELECT * FROM registration_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find registration request", e)
        })
    }

    async fn list(
        &self,
        query: &RegistrationQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<RegistrationRequest>> {
        let total = self.count(query).await?;

        let sql = format!(
            "SELECT * FROM registration_requests WHERE {FILTER} \
             ORDER BY created_at DESC, id DESC LIMIT $6 OFFSET $7"
        );
        let items = sqlx::query_as::<_, RegistrationRequest>(&sql)
            .bind(query.volunteer_id)
            .bind(query.supervisor_id)
            .bind(query.status)
            .bind(query.course_name.as_deref())
            .bind(query.semester.as_deref())
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to list registration requests",
                    e,
                )
            })?;

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn count(&self, query: &RegistrationQuery) -> AppResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM registration_requests WHERE {FILTER}");
        let total: i64 = sqlx::query_scalar(&sql)
            .bind(query.volunteer_id)
            .bind(query.supervisor_id)
            .bind(query.status)
            .bind(query.course_name.as_deref())
            .bind(query.semester.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to count registration requests",
                    e,
                )
            })?;
        Ok(total as u64)
    }

    async fn apply_transition(
        &self,
        transition: &RegistrationTransition,
    ) -> AppResult<Option<RegistrationRequest>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let updated = sqlx::query_as::<_, RegistrationRequest>(
            "UPDATE registration_requests \
             SET status = $3, reviewed_by = COALESCE($4, reviewed_by), updated_at = NOW() \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(transition.id)
        .bind(transition.from)
        .bind(transition.to)
        .bind(transition.reviewed_by)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update registration status", e)
        })?;

        let Some(request) = updated else {
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
            })?;
            return Ok(None);
        };

        if let Some(enrollment) = &transition.enrollment {
            let created = insert_enrollment(&mut *tx, enrollment).await?;
            if !created {
                debug!(request_id = %request.id, "Enrollment already existed; skipped insert");
            }
        }

        for notification in &transition.notifications {
            insert_notification(&mut *tx, notification).await?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(Some(request))
    }
}
