//! Sending messages and reading conversations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use hourbook_core::error::AppError;
use hourbook_core::types::pagination::{PageRequest, PageResponse};
use hourbook_database::store::{MessageStore, UserStore};
use hourbook_entity::message::{CreateMessage, Message};
use hourbook_entity::notification::NotificationTrigger;
use hourbook_entity::user::User;

use crate::context::RequestContext;
use crate::notification::{NotificationRules, Subject};

/// Maximum message body length in characters.
pub const MAX_BODY_CHARS: usize = 4000;

/// A message addressed by the receiver's email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub receiver_email: String,
    pub body: String,
}

/// Handles direct messages.
#[derive(Debug, Clone)]
pub struct MessageService {
    users: Arc<dyn UserStore>,
    messages: Arc<dyn MessageStore>,
    rules: Arc<NotificationRules>,
}

impl MessageService {
    /// Creates a new message service.
    pub fn new(
        users: Arc<dyn UserStore>,
        messages: Arc<dyn MessageStore>,
        rules: Arc<NotificationRules>,
    ) -> Self {
        Self {
            users,
            messages,
            rules,
        }
    }

    /// Sends a message and notifies the receiver in the same write.
    pub async fn send(
        &self,
        ctx: &RequestContext,
        req: SendMessageRequest,
    ) -> Result<Message, AppError> {
        let body = req.body.trim();
        if body.is_empty() {
            return Err(AppError::validation("Message body cannot be empty"));
        }
        if body.chars().count() > MAX_BODY_CHARS {
            return Err(AppError::validation(format!(
                "Message body exceeds {MAX_BODY_CHARS} characters"
            )));
        }

        let sender = self.load(ctx).await?;
        let receiver = self.lookup(&req.receiver_email).await?;
        if receiver.id == sender.id {
            return Err(AppError::validation("Cannot send a message to yourself"));
        }

        let sender_name = sender.full_name();
        let mut notifications = self
            .rules
            .build(
                NotificationTrigger::MessageReceived,
                sender.id,
                &Subject::Message {
                    receiver_id: receiver.id,
                    sender_name: &sender_name,
                },
            )
            .await?;
        let Some(notification) = notifications.pop() else {
            return Err(AppError::internal("Message notification resolved no receiver"));
        };

        let message = self
            .messages
            .send(
                &CreateMessage {
                    sender_id: sender.id,
                    receiver_id: receiver.id,
                    body: body.to_string(),
                },
                &notification,
            )
            .await?;

        info!(
            user_id = %ctx.user_id,
            receiver_id = %receiver.id,
            message_id = %message.id,
            "Message sent"
        );

        Ok(message)
    }

    /// Messages between the caller and another user, oldest first.
    pub async fn conversation(
        &self,
        ctx: &RequestContext,
        other_email: &str,
        page: &PageRequest,
    ) -> Result<PageResponse<Message>, AppError> {
        let other = self.lookup(other_email).await?;
        self.messages.conversation(ctx.user_id, other.id, page).await
    }

    async fn load(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    async fn lookup(&self, email: &str) -> Result<User, AppError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No user with email '{}'", email.trim())))
    }
}
