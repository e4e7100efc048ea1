//! Notification kind enumeration.

use serde::{Deserialize, Serialize};

/// Type tag carried by every notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// A new direct message arrived.
    Message,
    /// A request of the receiver was approved.
    Approval,
    /// A request of the receiver was rejected.
    Rejection,
    /// A request is waiting for the receiver's review.
    Review,
}

impl NotificationKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Approval => "approval",
            Self::Rejection => "rejection",
            Self::Review => "review",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
