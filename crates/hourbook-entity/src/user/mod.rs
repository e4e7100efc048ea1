//! User domain entities.

pub mod model;
pub mod role;

pub use model::{CreateUser, User, normalize_email, split_display_name};
pub use role::UserRole;
