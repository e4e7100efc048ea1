//! Role checks shared by handlers and services.

use hourbook_core::error::AppError;
use hourbook_core::types::UserId;
use hourbook_entity::user::UserRole;

/// Stateless role guard.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleGuard;

impl RoleGuard {
    /// Requires exactly the given role.
    pub fn require_role(actual: UserRole, required: UserRole) -> Result<(), AppError> {
        if actual == required {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{actual}' may not perform this action; '{required}' required"
            )))
        }
    }

    /// Requires one of the given roles.
    pub fn require_any(actual: UserRole, allowed: &[UserRole]) -> Result<(), AppError> {
        if allowed.contains(&actual) {
            Ok(())
        } else {
            let names: Vec<&str> = allowed.iter().map(|r| r.as_str()).collect();
            Err(AppError::forbidden(format!(
                "Role '{actual}' may not perform this action; one of [{}] required",
                names.join(", ")
            )))
        }
    }

    /// Requires the caller to be `owner` or to hold one of the `bypass` roles.
    pub fn require_self_or(
        actual: UserRole,
        caller: UserId,
        owner: UserId,
        bypass: &[UserRole],
    ) -> Result<(), AppError> {
        if caller == owner || bypass.contains(&actual) {
            Ok(())
        } else {
            Err(AppError::forbidden("Access to another user's records is not allowed"))
        }
    }
}
