//! Hours request entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hourbook_core::types::{HoursRequestId, UserId};

use super::status::HoursStatus;

/// A claimed block of service time awaiting or past supervisor review.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HoursRequest {
    /// Unique request identifier.
    pub id: HoursRequestId,
    /// Volunteer who performed the service.
    pub volunteer_id: UserId,
    /// Supervisor who reviews the claim.
    pub supervisor_id: UserId,
    /// Course code the hours count toward.
    pub class_name: String,
    /// Calendar date of the service.
    pub date: NaiveDate,
    /// Start time.
    pub from_time: NaiveTime,
    /// End time.
    pub to_time: NaiveTime,
    /// Free-text description of the work.
    pub activity: String,
    /// `to_time - from_time` in fractional hours.
    pub hours: f64,
    /// Current workflow status.
    pub status: HoursStatus,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create an hours request. `hours` is precomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHoursRequest {
    pub volunteer_id: UserId,
    pub supervisor_id: UserId,
    pub class_name: String,
    pub date: NaiveDate,
    pub from_time: NaiveTime,
    pub to_time: NaiveTime,
    pub activity: String,
    pub hours: f64,
}

/// Filter for listing hours requests. `None` fields match anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HoursQuery {
    pub volunteer_id: Option<UserId>,
    pub supervisor_id: Option<UserId>,
    pub class_name: Option<String>,
    pub status: Option<HoursStatus>,
}

impl HoursQuery {
    /// Whether a request passes this filter.
    pub fn matches(&self, request: &HoursRequest) -> bool {
        self.volunteer_id.is_none_or(|id| id == request.volunteer_id)
            && self.supervisor_id.is_none_or(|id| id == request.supervisor_id)
            && self
                .class_name
                .as_deref()
                .is_none_or(|c| c == request.class_name)
            && self.status.is_none_or(|s| s == request.status)
    }
}

/// Approved hours summed per (activity, class, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProgressEntry {
    pub activity: String,
    pub class_name: String,
    pub activity_date: NaiveDate,
    pub total_hours: f64,
}
