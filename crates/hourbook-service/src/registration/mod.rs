//! Registration request submission, listing and review.

pub mod review;
pub mod service;

pub use review::RegistrationReviewService;
pub use service::{RegistrationService, SubmitRegistrationRequest};
