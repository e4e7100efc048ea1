//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hourbook_core::types::{NotificationId, UserId};

use super::kind::NotificationKind;

/// A persisted notice for a user about a workflow outcome or a new message.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The recipient user.
    pub receiver_id: UserId,
    /// The user whose action caused this notification.
    pub sender_id: Option<UserId>,
    /// Type tag.
    pub kind: NotificationKind,
    /// Notification body text.
    pub body: String,
    /// Whether the user has read this notification. Only ever goes false -> true.
    pub is_read: bool,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification has been read.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

/// Data required to create a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateNotification {
    pub receiver_id: UserId,
    pub sender_id: Option<UserId>,
    pub kind: NotificationKind,
    pub body: String,
}
