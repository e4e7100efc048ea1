//! Notification repository implementation.

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};

use hourbook_core::error::{AppError, ErrorKind};
use hourbook_core::result::AppResult;
use hourbook_core::types::pagination::{PageRequest, PageResponse};
use hourbook_core::types::{NotificationId, UserId};
use hourbook_entity::notification::{CreateNotification, Notification};

use crate::store::NotificationStore;

/// Repository for notification reads and read-state updates.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Insert one notification on the given executor.
pub(crate) async fn insert_notification(
    executor: impl PgExecutor<'_>,
    data: &CreateNotification,
) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO notifications (id, receiver_id, sender_id, kind, body) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(NotificationId::new())
    .bind(data.receiver_id)
    .bind(data.sender_id)
    .bind(data.kind)
    .bind(&data.body)
    .execute(executor)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create notification", e))?;
    Ok(())
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn list_for_user(
        &self,
        receiver_id: UserId,
        unread_only: bool,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE receiver_id = $1 AND (NOT $2 OR is_read = FALSE)",
        )
        .bind(receiver_id)
        .bind(unread_only)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
        })?;

        let items = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications \
             WHERE receiver_id = $1 AND (NOT $2 OR is_read = FALSE) \
             ORDER BY created_at DESC, id DESC LIMIT $3 OFFSET $4",
        )
        .bind(receiver_id)
        .bind(unread_only)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })?;

        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn unread_count(&self, receiver_id: UserId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE receiver_id = $1 AND is_read = FALSE",
        )
        .bind(receiver_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))?;
        Ok(count as u64)
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        receiver_id: UserId,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = TRUE, read_at = COALESCE(read_at, NOW()) \
             WHERE id = $1 AND receiver_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(receiver_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark as read", e))
    }

    async fn mark_all_read(&self, receiver_id: UserId) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = NOW() \
             WHERE receiver_id = $1 AND is_read = FALSE",
        )
        .bind(receiver_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }
}
