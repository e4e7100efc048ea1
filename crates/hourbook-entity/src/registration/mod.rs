//! Registration request entities.

pub mod model;
pub mod status;

pub use model::{CreateRegistrationRequest, RegistrationQuery, RegistrationRequest};
pub use status::RegistrationStatus;
