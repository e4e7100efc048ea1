//! Enrollment (volunteer class membership) entities.

pub mod model;

pub use model::{CreateEnrollment, Enrollment};
