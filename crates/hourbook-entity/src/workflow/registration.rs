//! Registration request state machine.

use hourbook_core::{AppError, AppResult};

use crate::notification::NotificationTrigger;
use crate::registration::RegistrationStatus;
use crate::user::UserRole;

use super::action::ReviewAction;
use super::decision::{Decision, Effect};

use RegistrationStatus::{Approved, PendingAdminApproval, PendingSupervisorApproval, Rejected};

/// Decide the outcome of `action` by `role` on a registration in `status`.
///
/// | from | role | action | to |
/// |---|---|---|---|
/// | PendingSupervisorApproval | Supervisor | Approve | PendingAdminApproval |
/// | PendingSupervisorApproval | Supervisor | Reject | Rejected |
/// | PendingAdminApproval | Admin | Approve | Approved (+ enrollment) |
/// | PendingAdminApproval | Admin | Reject | Rejected |
///
/// Every other reviewer/status pair is an invalid-state error; volunteers
/// are never allowed to review.
pub fn decide_registration(
    status: RegistrationStatus,
    role: UserRole,
    action: ReviewAction,
) -> AppResult<Decision<RegistrationStatus>> {
    use NotificationTrigger::{RegistrationApproved, RegistrationForwarded, RegistrationRejected};

    match (role, status, action) {
        (UserRole::Volunteer, _, _) => Err(AppError::forbidden(
            "Volunteers cannot review registration requests",
        )),
        (UserRole::Supervisor, PendingSupervisorApproval, ReviewAction::Approve) => {
            Ok(Decision::new(
                status,
                PendingAdminApproval,
                vec![Effect::Notify(RegistrationForwarded)],
            ))
        }
        (UserRole::Supervisor, PendingSupervisorApproval, ReviewAction::Reject) => Ok(
            Decision::new(status, Rejected, vec![Effect::Notify(RegistrationRejected)]),
        ),
        (UserRole::Admin, PendingAdminApproval, ReviewAction::Approve) => Ok(Decision::new(
            status,
            Approved,
            vec![
                Effect::CreateEnrollment,
                Effect::Notify(RegistrationApproved),
            ],
        )),
        (UserRole::Admin, PendingAdminApproval, ReviewAction::Reject) => Ok(Decision::new(
            status,
            Rejected,
            vec![Effect::Notify(RegistrationRejected)],
        )),
        (UserRole::Supervisor | UserRole::Admin, current, _) if current.is_terminal() => {
            Err(AppError::invalid_state(format!(
                "Registration request already processed (status: {current})"
            )))
        }
        (UserRole::Supervisor | UserRole::Admin, current, _) => {
            Err(AppError::invalid_state(format!(
                "Registration request is '{current}'; a {role} cannot {action} it now"
            )))
        }
    }
}
