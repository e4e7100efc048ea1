//! Enrollments and the roster derived from them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use hourbook_auth::rbac::RoleGuard;
use hourbook_core::error::AppError;
use hourbook_core::types::UserId;
use hourbook_database::store::{EnrollmentStore, HoursStore};
use hourbook_entity::enrollment::Enrollment;
use hourbook_entity::user::{User, UserRole};

use crate::context::RequestContext;
use crate::hours::progress::REVIEWERS;

/// A supervised volunteer with their approved total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub volunteer: User,
    pub total_hours: f64,
}

/// Reads enrollments and rosters.
#[derive(Debug, Clone)]
pub struct RosterService {
    enrollments: Arc<dyn EnrollmentStore>,
    hours: Arc<dyn HoursStore>,
}

impl RosterService {
    /// Creates a new roster service.
    pub fn new(enrollments: Arc<dyn EnrollmentStore>, hours: Arc<dyn HoursStore>) -> Self {
        Self { enrollments, hours }
    }

    /// Whether the calling volunteer is enrolled in a class for a semester.
    pub async fn check_enrollment(
        &self,
        ctx: &RequestContext,
        class_name: &str,
        semester: &str,
    ) -> Result<bool, AppError> {
        RoleGuard::require_role(ctx.role, UserRole::Volunteer)?;
        self.enrollments
            .is_enrolled(ctx.user_id, class_name.trim(), semester.trim())
            .await
    }

    /// A volunteer's enrollments.
    pub async fn enrollments_of(
        &self,
        ctx: &RequestContext,
        volunteer_id: UserId,
    ) -> Result<Vec<Enrollment>, AppError> {
        RoleGuard::require_self_or(ctx.role, ctx.user_id, volunteer_id, &REVIEWERS)?;
        self.enrollments.list_for_volunteer(volunteer_id).await
    }

    /// Supervisors a volunteer is enrolled under.
    pub async fn supervisors_of(
        &self,
        ctx: &RequestContext,
        volunteer_id: UserId,
    ) -> Result<Vec<User>, AppError> {
        RoleGuard::require_self_or(ctx.role, ctx.user_id, volunteer_id, &REVIEWERS)?;
        self.enrollments.supervisors_of_volunteer(volunteer_id).await
    }

    /// Volunteers enrolled under a supervisor, with their totals.
    pub async fn volunteers_of(
        &self,
        ctx: &RequestContext,
        supervisor_id: UserId,
    ) -> Result<Vec<RosterEntry>, AppError> {
        RoleGuard::require_self_or(ctx.role, ctx.user_id, supervisor_id, &[UserRole::Admin])?;

        let volunteers = self.enrollments.volunteers_of_supervisor(supervisor_id).await?;
        let mut roster = Vec::with_capacity(volunteers.len());
        for volunteer in volunteers {
            let total_hours = self.hours.approved_total(volunteer.id).await?;
            roster.push(RosterEntry {
                volunteer,
                total_hours,
            });
        }
        Ok(roster)
    }
}
