//! Supervisor decisions on hours requests.

use std::sync::Arc;

use tracing::{info, warn};

use hourbook_core::error::AppError;
use hourbook_core::types::HoursRequestId;
use hourbook_database::store::{HoursStore, HoursTransition};
use hourbook_entity::hours::HoursRequest;
use hourbook_entity::user::UserRole;
use hourbook_entity::workflow::{ReviewAction, decide_hours};

use crate::context::RequestContext;
use crate::notification::{NotificationRules, Subject};

/// Applies review decisions to hours requests.
#[derive(Debug, Clone)]
pub struct HoursReviewService {
    hours: Arc<dyn HoursStore>,
    rules: Arc<NotificationRules>,
}

impl HoursReviewService {
    /// Creates a new hours review service.
    pub fn new(hours: Arc<dyn HoursStore>, rules: Arc<NotificationRules>) -> Self {
        Self { hours, rules }
    }

    /// Approves or rejects an hours request.
    ///
    /// Only the assigned supervisor may decide, and only once. Approved
    /// hours count toward the volunteer's total from then on.
    pub async fn decide(
        &self,
        ctx: &RequestContext,
        id: HoursRequestId,
        action: ReviewAction,
    ) -> Result<HoursRequest, AppError> {
        let request = self
            .hours
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Hours request {id} not found")))?;

        if ctx.role == UserRole::Supervisor && request.supervisor_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the assigned supervisor can review this request",
            ));
        }

        let decision = decide_hours(request.status, ctx.role, action)?;

        let notifications = self
            .rules
            .build_all(decision.triggers(), ctx.user_id, &Subject::Hours(&request))
            .await?;

        let transition = HoursTransition {
            id,
            from: decision.from,
            to: decision.to,
            notifications,
        };

        let Some(updated) = self.hours.apply_transition(&transition).await? else {
            warn!(
                user_id = %ctx.user_id,
                request_id = %id,
                "Hours request changed during review"
            );
            return Err(AppError::invalid_state("Hours request already processed"));
        };

        info!(
            user_id = %ctx.user_id,
            request_id = %id,
            action = %action,
            status = %updated.status,
            hours = updated.hours,
            "Hours request reviewed"
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use hourbook_core::error::ErrorKind;
    use hourbook_database::store::NotificationStore;
    use hourbook_entity::hours::HoursStatus;
    use hourbook_entity::notification::NotificationKind;

    use super::*;
    use crate::hours::{HoursService, ProgressService, SubmitHoursRequest};
    use crate::test_support::Fixture;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn submission(from: NaiveTime, to: NaiveTime) -> SubmitHoursRequest {
        SubmitHoursRequest {
            supervisor_email: "sam@x.org".into(),
            class_name: "RSSW290".into(),
            date: NaiveDate::from_ymd_opt(2024, 10, 3).unwrap(),
            from_time: from,
            to_time: to,
            activity: "Tutoring".into(),
        }
    }

    fn services(f: &Fixture) -> (HoursService, HoursReviewService, ProgressService) {
        let s = &f.store;
        (
            HoursService::new(s.users.clone(), s.classes.clone(), s.hours.clone()),
            HoursReviewService::new(s.hours.clone(), f.rules.clone()),
            ProgressService::new(
                s.users.clone(),
                s.classes.clone(),
                s.enrollments.clone(),
                s.hours.clone(),
            ),
        )
    }

    #[tokio::test]
    async fn test_approval_credits_once() {
        let f = Fixture::new().await;
        let (hours, review, progress) = services(&f);
        let vol = Fixture::ctx(&f.volunteer);
        let sup = Fixture::ctx(&f.supervisor);

        let request = hours.submit(&vol, submission(t(10, 0), t(12, 30))).await.unwrap();
        assert_eq!(request.hours, 2.5);
        assert_eq!(request.status, HoursStatus::Pending);
        assert_eq!(hours.pending_count(&sup).await.unwrap(), 1);

        let approved = review.decide(&sup, request.id, ReviewAction::Approve).await.unwrap();
        assert_eq!(approved.status, HoursStatus::Approved);

        let err = review
            .decide(&sup, request.id, ReviewAction::Approve)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);

        let summary = progress.summary(&vol, f.volunteer.id).await.unwrap();
        assert_eq!(summary.total_hours, 2.5);
        assert_eq!(summary.pending_hours_requests, 0);

        let page = f
            .store
            .notifications
            .list_for_user(f.volunteer.id, false, &Default::default())
            .await
            .unwrap();
        assert_eq!(page.items[0].kind, NotificationKind::Approval);
        assert_eq!(
            page.items[0].body,
            "Your hours request for Tutoring on 2024-10-03 has been approved."
        );
    }

    #[tokio::test]
    async fn test_non_positive_span_rejected_before_write() {
        let f = Fixture::new().await;
        let (hours, _, _) = services(&f);
        let vol = Fixture::ctx(&f.volunteer);

        for (from, to) in [(t(12, 0), t(12, 0)), (t(13, 0), t(9, 0))] {
            let err = hours.submit(&vol, submission(from, to)).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
        let page = hours.list(&vol, None, &Default::default()).await.unwrap();
        assert_eq!(page.total_items, 0);
    }

    #[tokio::test]
    async fn test_only_assigned_supervisor_decides() {
        let f = Fixture::new().await;
        let (hours, review, _) = services(&f);
        let request = hours
            .submit(&Fixture::ctx(&f.volunteer), submission(t(9, 0), t(10, 0)))
            .await
            .unwrap();

        for ctx in [
            Fixture::ctx(&f.other_supervisor),
            Fixture::ctx(&f.admin),
            Fixture::ctx(&f.volunteer),
        ] {
            let err = review
                .decide(&ctx, request.id, ReviewAction::Reject)
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authorization);
        }
    }

    #[tokio::test]
    async fn test_rejected_hours_do_not_count() {
        let f = Fixture::new().await;
        let (hours, review, progress) = services(&f);
        let vol = Fixture::ctx(&f.volunteer);
        let sup = Fixture::ctx(&f.supervisor);

        let a = hours.submit(&vol, submission(t(9, 0), t(11, 0))).await.unwrap();
        let b = hours.submit(&vol, submission(t(13, 0), t(14, 0))).await.unwrap();
        review.decide(&sup, a.id, ReviewAction::Approve).await.unwrap();
        review.decide(&sup, b.id, ReviewAction::Reject).await.unwrap();

        let report = progress
            .progress(&sup, f.volunteer.id, Some("RSSW290"))
            .await
            .unwrap();
        assert_eq!(report.total_hours, 2.0);
        let class = report.class.unwrap();
        assert_eq!(class.hour_requirement, 20.0);
        assert_eq!(class.remaining_hours, 18.0);
    }

    #[tokio::test]
    async fn test_concurrent_approvals_credit_once() {
        let f = Fixture::new().await;
        let (hours, review, progress) = services(&f);
        let vol = Fixture::ctx(&f.volunteer);
        let sup = Fixture::ctx(&f.supervisor);
        let request = hours.submit(&vol, submission(t(10, 0), t(12, 30))).await.unwrap();

        let (a, b) = tokio::join!(
            review.decide(&sup, request.id, ReviewAction::Approve),
            review.decide(&sup, request.id, ReviewAction::Approve),
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let failed = a.err().or(b.err()).unwrap();
        assert_eq!(failed.kind, ErrorKind::InvalidState);

        let summary = progress.summary(&vol, f.volunteer.id).await.unwrap();
        assert_eq!(summary.total_hours, 2.5);
    }

    #[tokio::test]
    async fn test_volunteer_cannot_read_others_progress() {
        let f = Fixture::new().await;
        let (_, _, progress) = services(&f);
        let err = progress
            .summary(&Fixture::stranger(UserRole::Volunteer), f.volunteer.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}
