//! Hours request submission and role-scoped reads.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::info;

use hourbook_auth::rbac::RoleGuard;
use hourbook_core::error::AppError;
use hourbook_core::types::HoursRequestId;
use hourbook_core::types::pagination::{PageRequest, PageResponse};
use hourbook_database::store::{ClassStore, HoursStore, UserStore};
use hourbook_entity::hours::{
    CreateHoursRequest, HoursQuery, HoursRequest, HoursStatus, compute_hours,
};
use hourbook_entity::user::UserRole;

use crate::context::RequestContext;

/// A volunteer's claim of logged service time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitHoursRequest {
    /// Email of the supervisor who will review the claim.
    pub supervisor_email: String,
    /// Class the hours count toward.
    pub class_name: String,
    /// Day the activity happened.
    pub date: NaiveDate,
    /// Start time.
    pub from_time: NaiveTime,
    /// End time, later than `from_time` on the same day.
    pub to_time: NaiveTime,
    /// What was done.
    pub activity: String,
}

/// Submits and reads hours requests.
#[derive(Debug, Clone)]
pub struct HoursService {
    users: Arc<dyn UserStore>,
    classes: Arc<dyn ClassStore>,
    hours: Arc<dyn HoursStore>,
}

pub(crate) fn scoped_query(ctx: &RequestContext, status: Option<HoursStatus>) -> HoursQuery {
    match ctx.role {
        UserRole::Volunteer => HoursQuery {
            volunteer_id: Some(ctx.user_id),
            status,
            ..HoursQuery::default()
        },
        UserRole::Supervisor => HoursQuery {
            supervisor_id: Some(ctx.user_id),
            status,
            ..HoursQuery::default()
        },
        UserRole::Admin => HoursQuery {
            status,
            ..HoursQuery::default()
        },
    }
}

impl HoursService {
    /// Creates a new hours service.
    pub fn new(
        users: Arc<dyn UserStore>,
        classes: Arc<dyn ClassStore>,
        hours: Arc<dyn HoursStore>,
    ) -> Self {
        Self {
            users,
            classes,
            hours,
        }
    }

    /// Submits an hours request for the calling volunteer.
    ///
    /// The span is computed before anything is written; a non-positive
    /// span is a validation error.
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        req: SubmitHoursRequest,
    ) -> Result<HoursRequest, AppError> {
        RoleGuard::require_role(ctx.role, UserRole::Volunteer)?;

        let hours = compute_hours(req.from_time, req.to_time)?;
        let activity = req.activity.trim();
        if activity.is_empty() {
            return Err(AppError::validation("Activity is required"));
        }

        let class = self
            .classes
            .find_by_name(&req.class_name)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Class '{}' not found", req.class_name.trim()))
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

        let request = self
            .hours
            .create(&CreateHoursRequest {
                volunteer_id: ctx.user_id,
                supervisor_id: supervisor.id,
                class_name: class.class_name,
                date: req.date,
                from_time: req.from_time,
                to_time: req.to_time,
                activity: activity.to_string(),
                hours,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            request_id = %request.id,
            hours = request.hours,
            supervisor_id = %request.supervisor_id,
            "Hours request submitted"
        );

        Ok(request)
    }

    /// Lists the hours requests visible to the caller.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        status: Option<HoursStatus>,
        page: &PageRequest,
    ) -> Result<PageResponse<HoursRequest>, AppError> {
        self.hours.list(&scoped_query(ctx, status), page).await
    }

    /// Gets one hours request, if visible to the caller.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        id: HoursRequestId,
    ) -> Result<HoursRequest, AppError> {
        let request = self
            .hours
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Hours request {id} not found")))?;

        if !scoped_query(ctx, None).matches(&request) {
            return Err(AppError::forbidden("Hours request belongs to another user"));
        }
        Ok(request)
    }

    /// Counts pending requests assigned to the calling supervisor.
    pub async fn pending_count(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        RoleGuard::require_role(ctx.role, UserRole::Supervisor)?;
        self.hours
            .count(&HoursQuery {
                supervisor_id: Some(ctx.user_id),
                status: Some(HoursStatus::Pending),
                ..HoursQuery::default()
            })
            .await
    }
}
