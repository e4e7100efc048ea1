use async_trait::async_trait;
use chrono::Utc;

use hourbook_core::result::AppResult;
use hourbook_core::types::pagination::{PageRequest, PageResponse};
use hourbook_core::types::{NotificationId, UserId};
use hourbook_entity::notification::Notification;

use super::MemoryStore;
use crate::store::NotificationStore;

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn list_for_user(
        &self,
        receiver_id: UserId,
        unread_only: bool,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let state = self.state.lock().await;
        let items = state
            .notifications
            .iter()
            .rev()
            .filter(|n| n.receiver_id == receiver_id && (!unread_only || n.is_unread()))
            .cloned()
            .collect();
        Ok(PageResponse::from_items(items, page))
    }

    async fn unread_count(&self, receiver_id: UserId) -> AppResult<u64> {
        let state = self.state.lock().await;
        Ok(state
            .notifications
            .iter()
            .filter(|n| n.receiver_id == receiver_id && n.is_unread())
            .count() as u64)
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        receiver_id: UserId,
    ) -> AppResult<Option<Notification>> {
        let mut state = self.state.lock().await;
        let Some(notification) = state
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.receiver_id == receiver_id)
        else {
            return Ok(None);
        };
        if notification.is_unread() {
            notification.is_read = true;
            notification.read_at = Some(Utc::now());
        }
        Ok(Some(notification.clone()))
    }

    async fn mark_all_read(&self, receiver_id: UserId) -> AppResult<u64> {
        let now = Utc::now();
        let mut state = self.state.lock().await;
        let mut changed = 0;
        for n in state
            .notifications
            .iter_mut()
            .filter(|n| n.receiver_id == receiver_id && n.is_unread())
        {
            n.is_read = true;
            n.read_at = Some(now);
            changed += 1;
        }
        Ok(changed)
    }
}
