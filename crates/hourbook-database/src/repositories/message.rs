//! Direct message repository.

use async_trait::async_trait;
use sqlx::PgPool;

use hourbook_core::error::{AppError, ErrorKind};
use hourbook_core::result::AppResult;
use hourbook_core::types::pagination::{PageRequest, PageResponse};
use hourbook_core::types::{MessageId, UserId};
use hourbook_entity::message::{CreateMessage, Message};
use hourbook_entity::notification::CreateNotification;

use super::notification::insert_notification;
use crate::store::MessageStore;

/// Repository for direct messages.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn send(
        &self,
        message: &CreateMessage,
        notification: &CreateNotification,
    ) -> AppResult<Message> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let stored = sqlx::query_as::<_, Message>(
            "INSERT INTO messages (id, sender_id, receiver_id, body) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(MessageId::new())
        .bind(message.sender_id)
        .bind(message.receiver_id)
        .bind(&message.body)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store message", e))?;

        insert_notification(&mut *tx, notification).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(stored)
    }

    async fn conversation(
        &self,
        a: UserId,
        b: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Message>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages \
             WHERE (sender_id = $1 AND receiver_id = $2) OR (sender_id = $2 AND receiver_id = $1)",
        )
        .bind(a)
        .bind(b)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count messages", e))?;

        let items = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages \
             WHERE (sender_id = $1 AND receiver_id = $2) OR (sender_id = $2 AND receiver_id = $1) \
             ORDER BY created_at ASC, id ASC LIMIT $3 OFFSET $4",
        )
        .bind(a)
        .bind(b)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load conversation", e))?;

        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
