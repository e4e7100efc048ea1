//! Hours request state machine.

use hourbook_core::{AppError, AppResult};

use crate::hours::HoursStatus;
use crate::notification::NotificationTrigger;
use crate::user::UserRole;

use super::action::ReviewAction;
use super::decision::{Decision, Effect};

/// Decide the outcome of `action` by `role` on an hours request in `status`.
///
/// Only supervisors review hours, and only while the request is pending.
/// Whether the supervisor is the *assigned* one is checked by the caller.
pub fn decide_hours(
    status: HoursStatus,
    role: UserRole,
    action: ReviewAction,
) -> AppResult<Decision<HoursStatus>> {
    match role {
        UserRole::Supervisor => {}
        UserRole::Volunteer | UserRole::Admin => {
            return Err(AppError::forbidden(
                "Only the assigned supervisor can review an hours request",
            ));
        }
    }

    match (status, action) {
        (HoursStatus::Pending, ReviewAction::Approve) => Ok(Decision::new(
            status,
            HoursStatus::Approved,
            vec![
                Effect::CreditHours,
                Effect::Notify(NotificationTrigger::HoursApproved),
            ],
        )),
        (HoursStatus::Pending, ReviewAction::Reject) => Ok(Decision::new(
            status,
            HoursStatus::Rejected,
            vec![Effect::Notify(NotificationTrigger::HoursRejected)],
        )),
        (HoursStatus::Approved | HoursStatus::Rejected, _) => Err(AppError::invalid_state(
            format!("Hours request already processed (status: {status})"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hourbook_core::ErrorKind;

    #[test]
    fn test_approve_credits_hours() {
        let d = decide_hours(HoursStatus::Pending, UserRole::Supervisor, ReviewAction::Approve)
            .unwrap();
        assert_eq!(d.to, HoursStatus::Approved);
        assert!(d.has_effect(Effect::CreditHours));
        assert!(d.has_effect(Effect::Notify(NotificationTrigger::HoursApproved)));
    }

    #[test]
    fn test_reject_does_not_credit() {
        let d = decide_hours(HoursStatus::Pending, UserRole::Supervisor, ReviewAction::Reject)
            .unwrap();
        assert_eq!(d.to, HoursStatus::Rejected);
        assert!(!d.has_effect(Effect::CreditHours));
    }

    #[test]
    fn test_second_decision_is_invalid_state() {
        for status in [HoursStatus::Approved, HoursStatus::Rejected] {
            for action in [ReviewAction::Approve, ReviewAction::Reject] {
                let err = decide_hours(status, UserRole::Supervisor, action).unwrap_err();
                assert_eq!(err.kind, ErrorKind::InvalidState);
            }
        }
    }

    #[test]
    fn test_non_supervisors_forbidden() {
        for role in [UserRole::Volunteer, UserRole::Admin] {
            let err = decide_hours(HoursStatus::Pending, role, ReviewAction::Approve).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authorization);
        }
    }
}
