//! Admin-only handlers.

pub mod classes;
pub mod users;
