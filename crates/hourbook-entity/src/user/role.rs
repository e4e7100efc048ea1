//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three kinds of account in the system.
///
/// The set is closed; workflow rules match on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Logs service hours and requests enrollment.
    Volunteer,
    /// Reviews hours and first-stage registration requests.
    Supervisor,
    /// Makes the final decision on registration requests.
    Admin,
}

impl UserRole {
    /// All roles, in display order.
    pub const ALL: [UserRole; 3] = [Self::Volunteer, Self::Supervisor, Self::Admin];

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether this role reviews other users' requests.
    pub fn is_reviewer(&self) -> bool {
        matches!(self, Self::Supervisor | Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Volunteer => "volunteer",
            Self::Supervisor => "supervisor",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = hourbook_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "volunteer" => Ok(Self::Volunteer),
            "supervisor" => Ok(Self::Supervisor),
            "admin" => Ok(Self::Admin),
            _ => Err(hourbook_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: volunteer, supervisor, admin"
            ))),
        }
    }
}
