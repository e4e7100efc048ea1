//! Notification domain entities.

pub mod kind;
pub mod model;
pub mod trigger;

pub use kind::NotificationKind;
pub use model::{CreateNotification, Notification};
pub use trigger::NotificationTrigger;
