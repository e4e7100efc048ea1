//! Hours request submission, review and progress reporting.

pub mod progress;
pub mod review;
pub mod service;

pub use progress::{ClassProgress, ProgressReport, ProgressService, VolunteerSummary};
pub use review::HoursReviewService;
pub use service::{HoursService, SubmitHoursRequest};
