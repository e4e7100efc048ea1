//! PostgreSQL implementations of the store traits.

pub mod class;
pub mod enrollment;
pub mod hours;
pub mod message;
pub mod notification;
pub mod registration;
pub mod user;

pub use class::ClassRepository;
pub use enrollment::EnrollmentRepository;
pub use hours::HoursRepository;
pub use message::MessageRepository;
pub use notification::NotificationRepository;
pub use registration::RegistrationRepository;
pub use user::UserRepository;
