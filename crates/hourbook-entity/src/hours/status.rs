//! Hours request status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use hourbook_core::AppError;

/// Status of an hours request. Both outcomes are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "hours_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HoursStatus {
    /// Waiting for the assigned supervisor.
    Pending,
    /// Approved; counts toward the volunteer's total.
    Approved,
    /// Rejected; never counted.
    Rejected,
}

impl HoursStatus {
    /// Check if the request is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for HoursStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HoursStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(AppError::validation(format!(
                "Invalid hours status: '{s}'. Expected one of: pending, approved, rejected"
            ))),
        }
    }
}
