//! Enrollment lookups and the supervisor/volunteer roster.

pub mod service;

pub use service::{RosterEntry, RosterService};
