//! Request DTOs with validation.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use hourbook_auth::identity::IdentityAssertion;
use hourbook_entity::hours::HoursStatus;
use hourbook_entity::registration::RegistrationStatus;
use hourbook_entity::user::UserRole;
use hourbook_entity::workflow::ReviewAction;
use hourbook_service::class::CreateClassRequest;
use hourbook_service::hours::SubmitHoursRequest;
use hourbook_service::message::SendMessageRequest;
use hourbook_service::registration::SubmitRegistrationRequest;
use hourbook_service::user::admin::CreateUserRequest;

/// Identity login body, posted by the token-exchange server.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Verified email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Display name from the identity provider.
    #[serde(default)]
    #[validate(length(max = 200))]
    pub display_name: String,
    /// Profile picture URL.
    #[serde(default)]
    #[validate(url)]
    pub avatar_url: Option<String>,
}

impl From<LoginRequest> for IdentityAssertion {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            display_name: req.display_name,
            avatar_url: req.avatar_url,
        }
    }
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token.
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Create user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserBody {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub last_name: String,
    pub role: UserRole,
}

impl From<CreateUserBody> for CreateUserRequest {
    fn from(body: CreateUserBody) -> Self {
        Self {
            email: body.email,
            first_name: body.first_name,
            last_name: body.last_name,
            role: body.role,
        }
    }
}

/// Create class request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateClassBody {
    /// Course code.
    #[validate(length(min = 1, max = 50))]
    pub class_name: String,
    /// Hours required to complete the class.
    #[validate(range(exclusive_min = 0.0, message = "Hour requirement must be positive"))]
    pub hour_requirement: f64,
}

impl From<CreateClassBody> for CreateClassRequest {
    fn from(body: CreateClassBody) -> Self {
        Self {
            class_name: body.class_name,
            hour_requirement: body.hour_requirement,
        }
    }
}

/// Registration request submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitRegistrationBody {
    #[validate(length(min = 1, max = 50, message = "Course name is required"))]
    pub course_name: String,
    #[validate(length(min = 1, max = 20, message = "Semester is required"))]
    pub semester: String,
    #[validate(range(min = 2000, max = 2100))]
    pub year: i32,
    #[validate(length(min = 1, max = 200, message = "Organization is required"))]
    pub organization: String,
    #[validate(email(message = "A valid supervisor email is required"))]
    pub supervisor_email: String,
}

impl From<SubmitRegistrationBody> for SubmitRegistrationRequest {
    fn from(body: SubmitRegistrationBody) -> Self {
        Self {
            course_name: body.course_name,
            semester: body.semester,
            year: body.year,
            organization: body.organization,
            supervisor_email: body.supervisor_email,
        }
    }
}

/// Hours request submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitHoursBody {
    #[validate(email(message = "A valid supervisor email is required"))]
    pub supervisor_email: String,
    #[validate(length(min = 1, max = 50, message = "Class name is required"))]
    pub class_name: String,
    pub date: NaiveDate,
    pub from_time: NaiveTime,
    pub to_time: NaiveTime,
    #[validate(length(min = 1, max = 500, message = "Activity is required"))]
    pub activity: String,
}

impl From<SubmitHoursBody> for SubmitHoursRequest {
    fn from(body: SubmitHoursBody) -> Self {
        Self {
            supervisor_email: body.supervisor_email,
            class_name: body.class_name,
            date: body.date,
            from_time: body.from_time,
            to_time: body.to_time,
            activity: body.activity,
        }
    }
}

/// Approve or reject a pending request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DecisionRequest {
    pub action: ReviewAction,
}

/// Direct message.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageBody {
    #[validate(email)]
    pub receiver_email: String,
    #[validate(length(min = 1, max = 4000, message = "Message body must be 1 to 4000 characters"))]
    pub body: String,
}

impl From<SendMessageBody> for SendMessageRequest {
    fn from(body: SendMessageBody) -> Self {
        Self {
            receiver_email: body.receiver_email,
            body: body.body,
        }
    }
}

/// `?role=` filter for the user directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleFilter {
    pub role: Option<UserRole>,
}

/// `?status=` filter for registration listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationFilter {
    pub status: Option<RegistrationStatus>,
}

/// `?status=` filter for hours listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HoursFilter {
    pub status: Option<HoursStatus>,
}

/// `?class_name=&semester=` for the enrollment check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentCheckQuery {
    pub class_name: String,
    pub semester: String,
}

/// `?class_name=` restricting a progress report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressQuery {
    pub class_name: Option<String>,
}

/// `?unread_only=` for the notification list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationFilter {
    #[serde(default)]
    pub unread_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_body_rejects_blank_activity() {
        let body = SubmitHoursBody {
            supervisor_email: "sam@x.org".to_string(),
            class_name: "RSSW290".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 10, 3).unwrap(),
            from_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            to_time: NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
            activity: String::new(),
        };
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("activity"));
    }

    #[test]
    fn test_class_body_requires_positive_requirement() {
        let body = CreateClassBody {
            class_name: "RSSW290".to_string(),
            hour_requirement: 0.0,
        };
        assert!(body.validate().is_err());
    }

    #[test]
    fn test_decision_action_is_lowercase() {
        let req: DecisionRequest = serde_json::from_str(r#"{"action":"approve"}"#).unwrap();
        assert_eq!(req.action, ReviewAction::Approve);
    }
}
