//! # hourbook-service
//!
//! Business logic service layer for Hourbook. Each service orchestrates
//! the store traits, the workflow engine and the auth primitives to
//! implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. Every operation on behalf
//! of a caller takes an explicit [`RequestContext`].

pub mod auth;
pub mod class;
pub mod context;
pub mod hours;
pub mod message;
pub mod notification;
pub mod registration;
pub mod roster;
pub mod user;

#[cfg(test)]
mod test_support;

pub use auth::AuthService;
pub use class::ClassService;
pub use context::RequestContext;
pub use hours::{HoursReviewService, HoursService, ProgressService};
pub use message::MessageService;
pub use notification::{NotificationRules, NotificationService};
pub use registration::{RegistrationReviewService, RegistrationService};
pub use roster::RosterService;
pub use user::{AdminUserService, UserService};
