//! Supervisor and admin decisions on registration requests.

use std::sync::Arc;

use tracing::{info, warn};

use hourbook_core::error::AppError;
use hourbook_core::types::RegistrationRequestId;
use hourbook_database::store::{RegistrationStore, RegistrationTransition};
use hourbook_entity::enrollment::CreateEnrollment;
use hourbook_entity::registration::RegistrationRequest;
use hourbook_entity::user::UserRole;
use hourbook_entity::workflow::{Effect, ReviewAction, decide_registration};

use crate::context::RequestContext;
use crate::notification::{NotificationRules, Subject};

/// Applies review decisions to registration requests.
#[derive(Debug, Clone)]
pub struct RegistrationReviewService {
    registrations: Arc<dyn RegistrationStore>,
    rules: Arc<NotificationRules>,
}

impl RegistrationReviewService {
    /// Creates a new registration review service.
    pub fn new(registrations: Arc<dyn RegistrationStore>, rules: Arc<NotificationRules>) -> Self {
        Self {
            registrations,
            rules,
        }
    }

    /// Approves or rejects a registration request.
    ///
    /// The status change, the enrollment (on final approval) and the
    /// notifications are written atomically. If another reviewer moved the
    /// request first, this fails with an invalid-state error.
    pub async fn decide(
        &self,
        ctx: &RequestContext,
        id: RegistrationRequestId,
        action: ReviewAction,
    ) -> Result<RegistrationRequest, AppError> {
        let request = self
            .registrations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Registration request {id} not found")))?;

        if ctx.role == UserRole::Supervisor && request.supervisor_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the assigned supervisor can review this request",
            ));
        }

        let decision = decide_registration(request.status, ctx.role, action)?;

        let notifications = self
            .rules
            .build_all(
                decision.triggers(),
                ctx.user_id,
                &Subject::Registration(&request),
            )
            .await?;

        let transition = RegistrationTransition {
            id,
            from: decision.from,
            to: decision.to,
            reviewed_by: ctx.is_admin().then_some(ctx.user_id),
            enrollment: decision
                .has_effect(Effect::CreateEnrollment)
                .then(|| CreateEnrollment::from(&request)),
            notifications,
        };

        let Some(updated) = self.registrations.apply_transition(&transition).await? else {
            warn!(
                user_id = %ctx.user_id,
                request_id = %id,
                expected = %decision.from,
                "Registration request changed during review"
            );
            return Err(AppError::invalid_state(
                "Registration request already processed",
            ));
        };

        info!(
            user_id = %ctx.user_id,
            request_id = %id,
            action = %action,
            from = %decision.from,
            to = %updated.status,
            "Registration request reviewed"
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use hourbook_core::error::ErrorKind;
    use hourbook_database::store::{EnrollmentStore, NotificationStore};
    use hourbook_entity::notification::NotificationKind;
    use hourbook_entity::registration::RegistrationStatus;

    use super::*;
    use crate::registration::{RegistrationService, SubmitRegistrationRequest};
    use crate::test_support::Fixture;

    fn services(f: &Fixture) -> (RegistrationService, RegistrationReviewService) {
        let s = &f.store;
        (
            RegistrationService::new(
                s.users.clone(),
                s.classes.clone(),
                s.enrollments.clone(),
                s.registrations.clone(),
            ),
            RegistrationReviewService::new(s.registrations.clone(), f.rules.clone()),
        )
    }

    async fn submit(f: &Fixture, service: &RegistrationService) -> RegistrationRequest {
        service
            .submit(
                &Fixture::ctx(&f.volunteer),
                SubmitRegistrationRequest {
                    course_name: "rssw290".into(),
                    semester: "Fall".into(),
                    year: 2024,
                    organization: "Food Bank".into(),
                    supervisor_email: "SAM@x.org".into(),
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_full_approval_creates_enrollment() {
        let f = Fixture::new().await;
        let (service, review) = services(&f);
        let request = submit(&f, &service).await;
        assert_eq!(request.status, RegistrationStatus::PendingSupervisorApproval);
        assert_eq!(request.course_name, "RSSW290");

        let forwarded = review
            .decide(&Fixture::ctx(&f.supervisor), request.id, ReviewAction::Approve)
            .await
            .unwrap();
        assert_eq!(forwarded.status, RegistrationStatus::PendingAdminApproval);
        assert_eq!(f.store.notifications.unread_count(f.admin.id).await.unwrap(), 1);

        let approved = review
            .decide(&Fixture::ctx(&f.admin), request.id, ReviewAction::Approve)
            .await
            .unwrap();
        assert_eq!(approved.status, RegistrationStatus::Approved);
        assert_eq!(approved.reviewed_by, Some(f.admin.id));

        assert!(f
            .store
            .enrollments
            .is_enrolled(f.volunteer.id, "RSSW290", "Fall")
            .await
            .unwrap());

        let page = f
            .store
            .notifications
            .list_for_user(f.volunteer.id, true, &Default::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].kind, NotificationKind::Approval);
        assert_eq!(
            page.items[0].body,
            "Your registration request for RSSW290 has been approved."
        );
    }

    #[tokio::test]
    async fn test_admin_cannot_skip_supervisor() {
        let f = Fixture::new().await;
        let (service, review) = services(&f);
        let request = submit(&f, &service).await;

        let err = review
            .decide(&Fixture::ctx(&f.admin), request.id, ReviewAction::Approve)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);
    }

    #[tokio::test]
    async fn test_admin_reject_leaves_no_enrollment() {
        let f = Fixture::new().await;
        let (service, review) = services(&f);
        let request = submit(&f, &service).await;
        review
            .decide(&Fixture::ctx(&f.supervisor), request.id, ReviewAction::Approve)
            .await
            .unwrap();

        let rejected = review
            .decide(&Fixture::ctx(&f.admin), request.id, ReviewAction::Reject)
            .await
            .unwrap();
        assert_eq!(rejected.status, RegistrationStatus::Rejected);
        assert!(f
            .store
            .enrollments
            .list_for_volunteer(f.volunteer.id)
            .await
            .unwrap()
            .is_empty());

        let err = review
            .decide(&Fixture::ctx(&f.admin), request.id, ReviewAction::Approve)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);
    }

    #[tokio::test]
    async fn test_unassigned_supervisor_and_volunteer_forbidden() {
        let f = Fixture::new().await;
        let (service, review) = services(&f);
        let request = submit(&f, &service).await;

        for ctx in [Fixture::ctx(&f.other_supervisor), Fixture::ctx(&f.volunteer)] {
            let err = review
                .decide(&ctx, request.id, ReviewAction::Approve)
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authorization);
        }
    }

    #[tokio::test]
    async fn test_resubmission_after_enrollment_conflicts() {
        let f = Fixture::new().await;
        let (service, review) = services(&f);
        let request = submit(&f, &service).await;
        review
            .decide(&Fixture::ctx(&f.supervisor), request.id, ReviewAction::Approve)
            .await
            .unwrap();
        review
            .decide(&Fixture::ctx(&f.admin), request.id, ReviewAction::Approve)
            .await
            .unwrap();

        let err = service
            .submit(
                &Fixture::ctx(&f.volunteer),
                SubmitRegistrationRequest {
                    course_name: "RSSW290".into(),
                    semester: "Fall".into(),
                    year: 2024,
                    organization: "Food Bank".into(),
                    supervisor_email: "sam@x.org".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_open_request_blocks_duplicate_until_rejected() {
        let f = Fixture::new().await;
        let (service, review) = services(&f);
        let request = submit(&f, &service).await;
        review
            .decide(&Fixture::ctx(&f.supervisor), request.id, ReviewAction::Approve)
            .await
            .unwrap();

        let again = SubmitRegistrationRequest {
            course_name: "RSSW290".into(),
            semester: "Fall".into(),
            year: 2024,
            organization: "Shelter".into(),
            supervisor_email: "sam@x.org".into(),
        };
        let err = service
            .submit(&Fixture::ctx(&f.volunteer), again.clone())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        review
            .decide(&Fixture::ctx(&f.admin), request.id, ReviewAction::Reject)
            .await
            .unwrap();
        let retried = service
            .submit(&Fixture::ctx(&f.volunteer), again)
            .await
            .unwrap();
        assert_eq!(retried.status, RegistrationStatus::PendingSupervisorApproval);
    }

    #[tokio::test]
    async fn test_listing_is_scoped_by_role() {
        let f = Fixture::new().await;
        let (service, _) = services(&f);
        submit(&f, &service).await;
        let page = Default::default();

        let own = service.list(&Fixture::ctx(&f.volunteer), None, &page).await.unwrap();
        let assigned = service.list(&Fixture::ctx(&f.supervisor), None, &page).await.unwrap();
        let other = service
            .list(&Fixture::ctx(&f.other_supervisor), None, &page)
            .await
            .unwrap();
        let all = service.list(&Fixture::ctx(&f.admin), None, &page).await.unwrap();
        let stranger = service
            .list(&Fixture::stranger(UserRole::Volunteer), None, &page)
            .await
            .unwrap();

        assert_eq!(own.total_items, 1);
        assert_eq!(assigned.total_items, 1);
        assert_eq!(other.total_items, 0);
        assert_eq!(all.total_items, 1);
        assert_eq!(stranger.total_items, 0);

        assert_eq!(service.pending_count(&Fixture::ctx(&f.supervisor)).await.unwrap(), 1);
        assert_eq!(service.pending_count(&Fixture::ctx(&f.admin)).await.unwrap(), 0);
    }
}
