//! Pure request workflow engine.
//!
//! Given a request's current status, the acting role and the requested
//! action, the `decide_*` functions return the next status plus the effects
//! the caller must persist atomically with the status change. Nothing here
//! touches storage.

pub mod action;
pub mod decision;
pub mod hours;
pub mod registration;

pub use action::ReviewAction;
pub use decision::{Decision, Effect};
pub use hours::decide_hours;
pub use registration::decide_registration;
