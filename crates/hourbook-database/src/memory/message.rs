use async_trait::async_trait;
use chrono::Utc;

use hourbook_core::result::AppResult;
use hourbook_core::types::pagination::{PageRequest, PageResponse};
use hourbook_core::types::{MessageId, UserId};
use hourbook_entity::message::{CreateMessage, Message};
use hourbook_entity::notification::CreateNotification;

use super::MemoryStore;
use crate::store::MessageStore;

#[async_trait]
impl MessageStore for MemoryStore {
    async fn send(
        &self,
        message: &CreateMessage,
        notification: &CreateNotification,
    ) -> AppResult<Message> {
        let stored = Message {
            id: MessageId::new(),
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            body: message.body.clone(),
            created_at: Utc::now(),
        };
        let mut state = self.state.lock().await;
        state.messages.push(stored.clone());
        state.push_notification(notification);
        Ok(stored)
    }

    async fn conversation(
        &self,
        a: UserId,
        b: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Message>> {
        let state = self.state.lock().await;
        let items = state
            .messages
            .iter()
            .filter(|m| m.is_between(a, b))
            .cloned()
            .collect();
        Ok(PageResponse::from_items(items, page))
    }
}
