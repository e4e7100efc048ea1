//! Registration request status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use hourbook_core::AppError;

/// Status of a registration request.
///
/// Progresses `PendingSupervisorApproval -> PendingAdminApproval -> Approved`,
/// or to `Rejected` from either pending stage. Never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "registration_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    /// Waiting for the assigned supervisor.
    PendingSupervisorApproval,
    /// Forwarded by the supervisor, waiting for an admin.
    PendingAdminApproval,
    /// Fully approved; an enrollment exists.
    Approved,
    /// Rejected at either stage.
    Rejected,
}

impl RegistrationStatus {
    /// Check if the request is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Position along the approval path, used to check monotonicity.
    pub fn stage(&self) -> u8 {
        match self {
            Self::PendingSupervisorApproval => 0,
            Self::PendingAdminApproval => 1,
            Self::Approved | Self::Rejected => 2,
        }
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingSupervisorApproval => "pending_supervisor_approval",
            Self::PendingAdminApproval => "pending_admin_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PendingSupervisorApproval => "Pending Supervisor Approval",
            Self::PendingAdminApproval => "Pending Admin Approval",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for RegistrationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "pending_supervisor_approval" => Ok(Self::PendingSupervisorApproval),
            "pending_admin_approval" => Ok(Self::PendingAdminApproval),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(AppError::validation(format!(
                "Invalid registration status: '{s}'"
            ))),
        }
    }
}
