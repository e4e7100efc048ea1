//! Store traits and the configured store bundle.

pub mod provider;
pub mod traits;
pub mod transition;

pub use provider::Store;
pub use traits::{
    ClassStore, EnrollmentStore, HoursStore, MessageStore, NotificationStore, RegistrationStore,
    UserStore,
};
pub use transition::{HoursTransition, RegistrationTransition};
