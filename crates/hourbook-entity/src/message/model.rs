//! Message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hourbook_core::types::{MessageId, UserId};

/// A direct message between two users. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// Author.
    pub sender_id: UserId,
    /// Recipient.
    pub receiver_id: UserId,
    /// Message text.
    pub body: String,
    /// When the message was sent.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Whether this message belongs to the conversation between `a` and `b`.
    pub fn is_between(&self, a: UserId, b: UserId) -> bool {
        (self.sender_id == a && self.receiver_id == b)
            || (self.sender_id == b && self.receiver_id == a)
    }
}

/// Data required to send a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessage {
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub body: String,
}
