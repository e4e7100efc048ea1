//! Class catalog service.

pub mod service;

pub use service::{ClassService, CreateClassRequest};
