//! Notification service and the trigger table.

pub mod rules;
pub mod service;

pub use rules::{NotificationRules, Subject};
pub use service::NotificationService;
