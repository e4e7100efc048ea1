//! Hours request entities and time arithmetic.

pub mod duration;
pub mod model;
pub mod status;

pub use duration::compute_hours;
pub use model::{CreateHoursRequest, HoursQuery, HoursRequest, ProgressEntry};
pub use status::HoursStatus;
