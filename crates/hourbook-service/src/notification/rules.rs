//! Notification trigger table: who hears about which workflow event.

use std::sync::Arc;

use hourbook_core::error::AppError;
use hourbook_core::types::UserId;
use hourbook_database::store::UserStore;
use hourbook_entity::hours::HoursRequest;
use hourbook_entity::notification::{CreateNotification, NotificationKind, NotificationTrigger};
use hourbook_entity::registration::RegistrationRequest;
use hourbook_entity::user::UserRole;

/// Recipients of a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// The volunteer who owns the request.
    Volunteer,
    /// Every admin account.
    AllAdmins,
    /// The receiver of a direct message.
    Receiver,
}

/// One row of the trigger table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub trigger: NotificationTrigger,
    pub audience: Audience,
    pub kind: NotificationKind,
}

/// The record a trigger fired for.
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    Registration(&'a RegistrationRequest),
    Hours(&'a HoursRequest),
    Message {
        receiver_id: UserId,
        sender_name: &'a str,
    },
}

impl Subject<'_> {
    fn volunteer_id(&self) -> Option<UserId> {
        match self {
            Self::Registration(r) => Some(r.volunteer_id),
            Self::Hours(h) => Some(h.volunteer_id),
            Self::Message { .. } => None,
        }
    }
}

/// The table row for a trigger.
pub const fn rule_for(trigger: NotificationTrigger) -> Rule {
    use NotificationTrigger::*;

    let (audience, kind) = match trigger {
        RegistrationForwarded => (Audience::AllAdmins, NotificationKind::Review),
        RegistrationApproved => (Audience::Volunteer, NotificationKind::Approval),
        RegistrationRejected => (Audience::Volunteer, NotificationKind::Rejection),
        HoursApproved => (Audience::Volunteer, NotificationKind::Approval),
        HoursRejected => (Audience::Volunteer, NotificationKind::Rejection),
        MessageReceived => (Audience::Receiver, NotificationKind::Message),
    };
    Rule {
        trigger,
        audience,
        kind,
    }
}

/// Renders the notification body for a trigger.
pub fn render(trigger: NotificationTrigger, subject: &Subject<'_>) -> Result<String, AppError> {
    use NotificationTrigger::*;

    let body = match (trigger, subject) {
        (RegistrationForwarded, Subject::Registration(r)) => format!(
            "Registration request from {} for {} is awaiting admin approval.",
            r.volunteer_name(),
            r.course_name
        ),
        (RegistrationApproved, Subject::Registration(r)) => format!(
            "Your registration request for {} has been approved.",
            r.course_name
        ),
        (RegistrationRejected, Subject::Registration(r)) => format!(
            "Unfortunately, your registration request for {} has been rejected.",
            r.course_name
        ),
        (HoursApproved, Subject::Hours(h)) => format!(
            "Your hours request for {} on {} has been approved.",
            h.activity, h.date
        ),
        (HoursRejected, Subject::Hours(h)) => format!(
            "Your hours request for {} on {} has been rejected.",
            h.activity, h.date
        ),
        (MessageReceived, Subject::Message { sender_name, .. }) => {
            format!("You have received a new message from {sender_name}")
        }
        (trigger, _) => {
            return Err(AppError::internal(format!(
                "Notification trigger {trigger:?} fired for the wrong record"
            )));
        }
    };
    Ok(body)
}

/// Resolves triggers into notification rows.
#[derive(Debug, Clone)]
pub struct NotificationRules {
    /// User store for audience lookups.
    users: Arc<dyn UserStore>,
}

impl NotificationRules {
    /// Creates a new notification rules engine.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Builds the notifications for `trigger`, sent by `sender`.
    pub async fn build(
        &self,
        trigger: NotificationTrigger,
        sender: UserId,
        subject: &Subject<'_>,
    ) -> Result<Vec<CreateNotification>, AppError> {
        let rule = rule_for(trigger);
        let body = render(trigger, subject)?;

        let receivers: Vec<UserId> = match (rule.audience, subject) {
            (Audience::AllAdmins, _) => self
                .users
                .find_all_by_role(UserRole::Admin)
                .await?
                .into_iter()
                .map(|u| u.id)
                .collect(),
            (Audience::Receiver, Subject::Message { receiver_id, .. }) => vec![*receiver_id],
            (Audience::Volunteer, s) => s.volunteer_id().into_iter().collect(),
            (Audience::Receiver, _) => Vec::new(),
        };

        Ok(receivers
            .into_iter()
            .map(|receiver_id| CreateNotification {
                receiver_id,
                sender_id: Some(sender),
                kind: rule.kind,
                body: body.clone(),
            })
            .collect())
    }

    /// Builds notifications for several triggers in order.
    pub async fn build_all(
        &self,
        triggers: impl IntoIterator<Item = NotificationTrigger>,
        sender: UserId,
        subject: &Subject<'_>,
    ) -> Result<Vec<CreateNotification>, AppError> {
        let mut out = Vec::new();
        for trigger in triggers {
            out.extend(self.build(trigger, sender, subject).await?);
        }
        Ok(out)
    }
}
