//! Registration request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hourbook_core::types::{RegistrationRequestId, UserId};

use super::status::RegistrationStatus;

/// A volunteer's request to enroll in a class under a supervisor.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RegistrationRequest {
    /// Unique request identifier.
    pub id: RegistrationRequestId,
    /// Requesting volunteer.
    pub volunteer_id: UserId,
    /// Volunteer email at submission time.
    pub volunteer_email: String,
    /// Volunteer given name at submission time.
    pub first_name: String,
    /// Volunteer family name at submission time.
    pub last_name: String,
    /// Course code.
    pub course_name: String,
    /// Semester label.
    pub semester: String,
    /// Calendar year.
    pub year: i32,
    /// Partner organization.
    pub organization: String,
    /// Supervisor who performs the first review.
    pub supervisor_id: UserId,
    /// Supervisor email at submission time.
    pub supervisor_email: String,
    /// Current workflow status.
    pub status: RegistrationStatus,
    /// Admin who made the final decision, once there is one.
    pub reviewed_by: Option<UserId>,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}

impl RegistrationRequest {
    /// "First Last" of the volunteer.
    pub fn volunteer_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Data required to create a registration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRegistrationRequest {
    pub volunteer_id: UserId,
    pub volunteer_email: String,
    pub first_name: String,
    pub last_name: String,
    pub course_name: String,
    pub semester: String,
    pub year: i32,
    pub organization: String,
    pub supervisor_id: UserId,
    pub supervisor_email: String,
}

/// Filter for listing registration requests. `None` fields match anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationQuery {
    /// Only requests from this volunteer.
    pub volunteer_id: Option<UserId>,
    /// Only requests assigned to this supervisor.
    pub supervisor_id: Option<UserId>,
    /// Only requests in this status.
    pub status: Option<RegistrationStatus>,
    /// Only requests for this course, ignoring case.
    pub course_name: Option<String>,
    pub semester: Option<String>,
}

impl RegistrationQuery {
    /// Whether a request passes this filter.
    pub fn matches(&self, request: &RegistrationRequest) -> bool {
        self.volunteer_id.is_none_or(|id| id == request.volunteer_id)
            && self.supervisor_id.is_none_or(|id| id == request.supervisor_id)
            && self.status.is_none_or(|s| s == request.status)
            && self
                .course_name
                .as_deref()
                .is_none_or(|c| c.eq_ignore_ascii_case(&request.course_name))
            && self.semester.as_deref().is_none_or(|s| s == request.semester)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn request() -> RegistrationRequest {
        RegistrationRequest {
            id: RegistrationRequestId::new(),
            volunteer_id: UserId::new(),
            volunteer_email: "vera@x.org".into(),
            first_name: "Vera".into(),
            last_name: "Lunde".into(),
            course_name: "RSSW290".into(),
            semester: "Fall".into(),
            year: 2024,
            organization: "Food Bank".into(),
            supervisor_id: UserId::new(),
            supervisor_email: "sam@x.org".into(),
            status: RegistrationStatus::PendingAdminApproval,
            reviewed_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_course_filter_ignores_case_but_semester_does_not() {
        let r = request();
        let by_course = RegistrationQuery {
            volunteer_id: Some(r.volunteer_id),
            course_name: Some("rssw290".into()),
            semester: Some("Fall".into()),
            ..RegistrationQuery::default()
        };
        assert!(by_course.matches(&r));

        let wrong_semester = RegistrationQuery {
            semester: Some("fall".into()),
            ..by_course.clone()
        };
        assert!(!wrong_semester.matches(&r));

        let wrong_status = RegistrationQuery {
            status: Some(RegistrationStatus::PendingSupervisorApproval),
            ..by_course
        };
        assert!(!wrong_status.matches(&r));
    }
}
