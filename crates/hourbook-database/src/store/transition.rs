//! Write sets for workflow transitions.
//!
//! A transition is applied as one atomic unit: the status compare-and-swap
//! plus every derived row. If the stored status no longer equals `from`,
//! nothing is written.

use serde::{Deserialize, Serialize};

use hourbook_core::types::{HoursRequestId, RegistrationRequestId, UserId};
use hourbook_entity::enrollment::CreateEnrollment;
use hourbook_entity::hours::HoursStatus;
use hourbook_entity::notification::CreateNotification;
use hourbook_entity::registration::RegistrationStatus;

/// Status change of a registration request and its derived rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationTransition {
    /// Request being transitioned.
    pub id: RegistrationRequestId,
    /// Expected current status.
    pub from: RegistrationStatus,
    /// New status.
    pub to: RegistrationStatus,
    /// Admin recorded as the final reviewer, if this is an admin decision.
    pub reviewed_by: Option<UserId>,
    /// Enrollment to insert; skipped if one already exists for the same key.
    pub enrollment: Option<CreateEnrollment>,
    /// Notifications to insert.
    pub notifications: Vec<CreateNotification>,
}

/// Status change of an hours request and its notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursTransition {
    /// Request being transitioned.
    pub id: HoursRequestId,
    /// Expected current status.
    pub from: HoursStatus,
    /// New status.
    pub to: HoursStatus,
    /// Notifications to insert.
    pub notifications: Vec<CreateNotification>,
}
