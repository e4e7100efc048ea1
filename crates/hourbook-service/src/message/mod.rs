//! Direct messaging between users.

pub mod service;

pub use service::{MessageService, SendMessageRequest};
