//! Hours request repository.

use async_trait::async_trait;
use sqlx::PgPool;

use hourbook_core::error::{AppError, ErrorKind};
use hourbook_core::result::AppResult;
use hourbook_core::types::pagination::{PageRequest, PageResponse};
use hourbook_core::types::{HoursRequestId, UserId};
use hourbook_entity::hours::{
    CreateHoursRequest, HoursQuery, HoursRequest, HoursStatus, ProgressEntry,
};

use super::notification::insert_notification;
use crate::store::{HoursStore, HoursTransition};

const FILTER: &str = "($1::uuid IS NULL OR volunteer_id = $1) \
     AND ($2::uuid IS NULL OR supervisor_id = $2) \
     AND ($3::text IS NULL OR class_name = $3) \
     AND ($4::hours_status IS NULL OR status = $4)";

/// Repository for hours requests.
#[derive(Debug, Clone)]
pub struct HoursRepository {
    pool: PgPool,
}

impl HoursRepository {
    /// Create a new hours repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HoursStore for HoursRepository {
    async fn create(&self, data: &CreateHoursRequest) -> AppResult<HoursRequest> {
        sqlx::query_as::<_, HoursRequest>(
            "INSERT INTO hours_requests \
             (id, volunteer_id, supervisor_id, class_name, date, from_time, to_time, activity, hours, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(HoursRequestId::new())
        .bind(data.volunteer_id)
        .bind(data.supervisor_id)
        .bind(&data.class_name)
        .bind(data.date)
        .bind(data.from_time)
        .bind(data.to_time)
        .bind(&data.activity)
        .bind(data.hours)
        .bind(HoursStatus::Pending)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create hours request", e)
        })
    }

    async fn find_by_id(&self, id: HoursRequestId) -> AppResult<Option<HoursRequest>> {
        sqlx::query_as::<_, HoursRequest>("SELECT * FROM hours_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find hours request", e)
            })
    }

    async fn list(
        &self,
        query: &HoursQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<HoursRequest>> {
        let total = self.count(query).await?;

        let sql = format!(
            "SELECT * FROM hours_requests WHERE {FILTER} \
             ORDER BY created_at DESC, id DESC LIMIT $5 OFFSET $6"
        );
        let items = sqlx::query_as::<_, HoursRequest>(&sql)
            .bind(query.volunteer_id)
            .bind(query.supervisor_id)
            .bind(query.class_name.as_deref())
            .bind(query.status)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list hours requests", e)
            })?;

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn count(&self, query: &HoursQuery) -> AppResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM hours_requests WHERE {FILTER}");
        let total: i64 = sqlx::query_scalar(&sql)
            .bind(query.volunteer_id)
            .bind(query.supervisor_id)
            .bind(query.class_name.as_deref())
            .bind(query.status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count hours requests", e)
            })?;
        Ok(total as u64)
    }

    async fn apply_transition(
        &self,
        transition: &HoursTransition,
    ) -> AppResult<Option<HoursRequest>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let updated = sqlx::query_as::<_, HoursRequest>(
            "UPDATE hours_requests SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(transition.id)
        .bind(transition.from)
        .bind(transition.to)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update hours status", e)
        })?;

        let Some(request) = updated else {
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
            })?;
            return Ok(None);
        };

        for notification in &transition.notifications {
            insert_notification(&mut *tx, notification).await?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(Some(request))
    }

    async fn approved_total(&self, volunteer_id: UserId) -> AppResult<f64> {
        sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(hours), 0)::float8 FROM hours_requests \
             WHERE volunteer_id = $1 AND status = $2",
        )
        .bind(volunteer_id)
        .bind(HoursStatus::Approved)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to total hours", e))
    }

    async fn progress(
        &self,
        volunteer_id: UserId,
        class_name: Option<&str>,
    ) -> AppResult<Vec<ProgressEntry>> {
        sqlx::query_as::<_, ProgressEntry>(
            "SELECT activity, class_name, date AS activity_date, \
                    SUM(hours)::float8 AS total_hours \
             FROM hours_requests \
             WHERE volunteer_id = $1 AND status = $2 AND ($3::text IS NULL OR class_name = $3) \
             GROUP BY activity, class_name, date \
             ORDER BY date, activity",
        )
        .bind(volunteer_id)
        .bind(HoursStatus::Approved)
        .bind(class_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load progress", e))
    }
}
