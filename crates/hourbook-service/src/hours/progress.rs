//! Derived hour totals and per-class progress.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use hourbook_auth::rbac::RoleGuard;
use hourbook_core::error::AppError;
use hourbook_core::types::UserId;
use hourbook_database::store::{ClassStore, EnrollmentStore, HoursStore, UserStore};
use hourbook_entity::hours::{HoursQuery, HoursStatus, ProgressEntry};
use hourbook_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// Roles that may read any volunteer's records.
pub(crate) const REVIEWERS: [UserRole; 2] = [UserRole::Supervisor, UserRole::Admin];

/// Headline numbers for one volunteer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolunteerSummary {
    pub volunteer: User,
    /// Sum of approved hours.
    pub total_hours: f64,
    pub enrollment_count: usize,
    pub pending_hours_requests: u64,
}

/// Requirement status for one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProgress {
    pub class_name: String,
    pub hour_requirement: f64,
    pub completed_hours: f64,
    /// Never negative.
    pub remaining_hours: f64,
}

/// Approved hours grouped by activity, class and date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub volunteer_id: UserId,
    pub entries: Vec<ProgressEntry>,
    pub total_hours: f64,
    /// Present when the report is filtered to one class.
    pub class: Option<ClassProgress>,
}

/// Read-side reporting over approved hours.
#[derive(Debug, Clone)]
pub struct ProgressService {
    users: Arc<dyn UserStore>,
    classes: Arc<dyn ClassStore>,
    enrollments: Arc<dyn EnrollmentStore>,
    hours: Arc<dyn HoursStore>,
}

impl ProgressService {
    /// Creates a new progress service.
    pub fn new(
        users: Arc<dyn UserStore>,
        classes: Arc<dyn ClassStore>,
        enrollments: Arc<dyn EnrollmentStore>,
        hours: Arc<dyn HoursStore>,
    ) -> Self {
        Self {
            users,
            classes,
            enrollments,
            hours,
        }
    }

    /// Summary for a volunteer: the volunteer themself or any reviewer.
    pub async fn summary(
        &self,
        ctx: &RequestContext,
        volunteer_id: UserId,
    ) -> Result<VolunteerSummary, AppError> {
        RoleGuard::require_self_or(ctx.role, ctx.user_id, volunteer_id, &REVIEWERS)?;

        let volunteer = self
            .users
            .find_by_id(volunteer_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {volunteer_id} not found")))?;

        let total_hours = self.hours.approved_total(volunteer_id).await?;
        let enrollment_count = self.enrollments.list_for_volunteer(volunteer_id).await?.len();
        let pending_hours_requests = self
            .hours
            .count(&HoursQuery {
                volunteer_id: Some(volunteer_id),
                status: Some(HoursStatus::Pending),
                ..HoursQuery::default()
            })
            .await?;

        Ok(VolunteerSummary {
            volunteer,
            total_hours,
            enrollment_count,
            pending_hours_requests,
        })
    }

    /// Progress report, optionally limited to one class.
    pub async fn progress(
        &self,
        ctx: &RequestContext,
        volunteer_id: UserId,
        class_name: Option<&str>,
    ) -> Result<ProgressReport, AppError> {
        RoleGuard::require_self_or(ctx.role, ctx.user_id, volunteer_id, &REVIEWERS)?;

        let class = match class_name {
            Some(name) => {
                let found = self.classes.find_by_name(name).await?;
                Some(found.ok_or_else(|| {
                    AppError::not_found(format!("Class '{}' not found", name.trim()))
                })?)
            }
            None => None,
        };

        let entries = self
            .hours
            .progress(volunteer_id, class.as_ref().map(|c| c.class_name.as_str()))
            .await?;
        let total_hours: f64 = entries.iter().map(|e| e.total_hours).sum();

        let class = class.map(|c| ClassProgress {
            remaining_hours: (c.hour_requirement - total_hours).max(0.0),
            class_name: c.class_name,
            hour_requirement: c.hour_requirement,
            completed_hours: total_hours,
        });

        Ok(ProgressReport {
            volunteer_id,
            entries,
            total_hours,
            class,
        })
    }
}
