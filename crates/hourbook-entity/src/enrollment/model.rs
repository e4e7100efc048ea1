//! Enrollment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hourbook_core::types::{EnrollmentId, RegistrationRequestId, UserId};

use crate::registration::RegistrationRequest;

/// Durable record that a volunteer is registered in a class for a semester.
///
/// Unique per `(volunteer_id, class_name, semester)` and never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    /// Unique enrollment identifier.
    pub id: EnrollmentId,
    /// The enrolled volunteer.
    pub volunteer_id: UserId,
    /// Course code.
    pub class_name: String,
    /// Semester label, e.g. `Fall`.
    pub semester: String,
    /// Calendar year.
    pub year: i32,
    /// Partner organization.
    pub organization: String,
    /// Supervisor who approved the registration.
    pub supervisor_id: UserId,
    /// The registration request this enrollment came from.
    pub registration_request_id: RegistrationRequestId,
    /// When the enrollment was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create an enrollment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEnrollment {
    pub volunteer_id: UserId,
    pub class_name: String,
    pub semester: String,
    pub year: i32,
    pub organization: String,
    pub supervisor_id: UserId,
    pub registration_request_id: RegistrationRequestId,
}

impl From<&RegistrationRequest> for CreateEnrollment {
    fn from(request: &RegistrationRequest) -> Self {
        Self {
            volunteer_id: request.volunteer_id,
            class_name: request.course_name.clone(),
            semester: request.semester.clone(),
            year: request.year,
            organization: request.organization.clone(),
            supervisor_id: request.supervisor_id,
            registration_request_id: request.id,
        }
    }
}
