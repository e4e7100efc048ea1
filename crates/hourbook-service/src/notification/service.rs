//! Notification listing and read-state management.

use std::sync::Arc;

use tracing::info;

use hourbook_core::error::AppError;
use hourbook_core::types::NotificationId;
use hourbook_core::types::pagination::{PageRequest, PageResponse};
use hourbook_database::store::NotificationStore;
use hourbook_entity::notification::Notification;

use crate::context::RequestContext;

/// Manages the caller's own notifications.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification store.
    notifications: Arc<dyn NotificationStore>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notifications: Arc<dyn NotificationStore>) -> Self {
        Self { notifications }
    }

    /// Lists notifications for the current user, newest first.
    pub async fn list_notifications(
        &self,
        ctx: &RequestContext,
        unread_only: bool,
        page: &PageRequest,
    ) -> Result<PageResponse<Notification>, AppError> {
        self.notifications
            .list_for_user(ctx.user_id, unread_only, page)
            .await
    }

    /// Gets the unread notification count.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        self.notifications.unread_count(ctx.user_id).await
    }

    /// Marks one of the caller's notifications as read.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: NotificationId,
    ) -> Result<Notification, AppError> {
        self.notifications
            .mark_read(notification_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Notification {notification_id} not found")))
    }

    /// Marks all of the caller's notifications as read.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        let changed = self.notifications.mark_all_read(ctx.user_id).await?;
        info!(user_id = %ctx.user_id, changed, "Marked all notifications read");
        Ok(changed)
    }
}
