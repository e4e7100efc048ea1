//! Registration request submission and role-scoped reads.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use hourbook_auth::rbac::RoleGuard;
use hourbook_core::error::AppError;
use hourbook_core::types::RegistrationRequestId;
use hourbook_core::types::pagination::{PageRequest, PageResponse};
use hourbook_database::store::{ClassStore, EnrollmentStore, RegistrationStore, UserStore};
use hourbook_entity::registration::{
    CreateRegistrationRequest, RegistrationQuery, RegistrationRequest, RegistrationStatus,
};
use hourbook_entity::user::UserRole;

use crate::context::RequestContext;

/// A volunteer's request to enroll in a class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRegistrationRequest {
    /// Class to enroll in.
    pub course_name: String,
    /// Semester label, e.g. `Fall`.
    pub semester: String,
    /// Academic year.
    pub year: i32,
    /// Partner organization where the service happens.
    pub organization: String,
    /// Email of the supervising user.
    pub supervisor_email: String,
}

/// Submits and reads registration requests.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    users: Arc<dyn UserStore>,
    classes: Arc<dyn ClassStore>,
    enrollments: Arc<dyn EnrollmentStore>,
    registrations: Arc<dyn RegistrationStore>,
}

/// Restricts a listing to what the caller may see.
pub(crate) fn scoped_query(
    ctx: &RequestContext,
    status: Option<RegistrationStatus>,
) -> RegistrationQuery {
    match ctx.role {
        UserRole::Volunteer => RegistrationQuery {
            volunteer_id: Some(ctx.user_id),
            status,
            ..RegistrationQuery::default()
        },
        UserRole::Supervisor => RegistrationQuery {
            supervisor_id: Some(ctx.user_id),
            status,
            ..RegistrationQuery::default()
        },
        UserRole::Admin => RegistrationQuery {
            status,
            ..RegistrationQuery::default()
        },
    }
}

impl RegistrationService {
    /// Creates a new registration service.
    pub fn new(
        users: Arc<dyn UserStore>,
        classes: Arc<dyn ClassStore>,
        enrollments: Arc<dyn EnrollmentStore>,
        registrations: Arc<dyn RegistrationStore>,
    ) -> Self {
        Self {
            users,
            classes,
            enrollments,
            registrations,
        }
    }

    /// Submits a registration request for the calling volunteer.
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        req: SubmitRegistrationRequest,
    ) -> Result<RegistrationRequest, AppError> {
        RoleGuard::require_role(ctx.role, UserRole::Volunteer)?;

        let semester = req.semester.trim();
        let organization = req.organization.trim();
        if semester.is_empty() {
            return Err(AppError::validation("Semester is required"));
        }
        if organization.is_empty() {
            return Err(AppError::validation("Organization is required"));
        }

        let volunteer = self
            .users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let class = self
            .classes
            .find_by_name(&req.course_name)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Class '{}' not found", req.course_name.trim()))
            })?;

        let supervisor = self
            .users
            .find_by_email(&req.supervisor_email)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "No user with email '{}'",
                    req.supervisor_email.trim()
                ))
            })?;
        if supervisor.role != UserRole::Supervisor {
            return Err(AppError::validation(format!(
                "'{}' is not a supervisor",
                supervisor.email
            )));
        }

        if self
            .enrollments
            .is_enrolled(volunteer.id, &class.class_name, semester)
            .await?
        {
            return Err(AppError::conflict(format!(
                "Already enrolled in {} for {semester}",
                class.class_name
            )));
        }

        for status in [
            RegistrationStatus::PendingSupervisorApproval,
            RegistrationStatus::PendingAdminApproval,
        ] {
            let open = RegistrationQuery {
                volunteer_id: Some(volunteer.id),
                course_name: Some(class.class_name.clone()),
                semester: Some(semester.to_string()),
                status: Some(status),
                ..RegistrationQuery::default()
            };
            if self.registrations.count(&open).await? > 0 {
                return Err(AppError::conflict(format!(
                    "A registration request for {} in {semester} is already open",
                    class.class_name
                )));
            }
        }

        let request = self
            .registrations
            .create(&CreateRegistrationRequest {
                volunteer_id: volunteer.id,
                volunteer_email: volunteer.email.clone(),
                first_name: volunteer.first_name.clone(),
                last_name: volunteer.last_name.clone(),
                course_name: class.class_name.clone(),
                semester: semester.to_string(),
                year: req.year,
                organization: organization.to_string(),
                supervisor_id: supervisor.id,
                supervisor_email: supervisor.email.clone(),
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            request_id = %request.id,
            course = %request.course_name,
            supervisor_id = %request.supervisor_id,
            "Registration request submitted"
        );

        Ok(request)
    }

    /// Lists the registration requests visible to the caller.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        status: Option<RegistrationStatus>,
        page: &PageRequest,
    ) -> Result<PageResponse<RegistrationRequest>, AppError> {
        self.registrations
            .list(&scoped_query(ctx, status), page)
            .await
    }

    /// Gets one registration request, if visible to the caller.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        id: RegistrationRequestId,
    ) -> Result<RegistrationRequest, AppError> {
        let request = self
            .registrations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Registration request {id} not found")))?;

        if !scoped_query(ctx, None).matches(&request) {
            return Err(AppError::forbidden(
                "Registration request belongs to another user",
            ));
        }
        Ok(request)
    }

    /// Counts requests awaiting the caller's review.
    pub async fn pending_count(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        let query = match ctx.role {
            UserRole::Volunteer => {
                return Err(AppError::forbidden("Volunteers do not review requests"));
            }
            UserRole::Supervisor => RegistrationQuery {
                supervisor_id: Some(ctx.user_id),
                status: Some(RegistrationStatus::PendingSupervisorApproval),
                ..RegistrationQuery::default()
            },
            UserRole::Admin => RegistrationQuery {
                status: Some(RegistrationStatus::PendingAdminApproval),
                ..RegistrationQuery::default()
            },
        };
        self.registrations.count(&query).await
    }
}
