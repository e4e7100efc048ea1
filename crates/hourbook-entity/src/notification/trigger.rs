//! Workflow events that produce notifications.

use serde::{Deserialize, Serialize};

/// A transition or action that the notification table has an entry for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationTrigger {
    /// Supervisor approved a registration; it now awaits an admin.
    RegistrationForwarded,
    /// Admin approved a registration.
    RegistrationApproved,
    /// Supervisor or admin rejected a registration.
    RegistrationRejected,
    /// Supervisor approved an hours request.
    HoursApproved,
    /// Supervisor rejected an hours request.
    HoursRejected,
    /// A direct message was sent.
    MessageReceived,
}
