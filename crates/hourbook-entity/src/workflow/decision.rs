//! Transition outcome types.

use serde::Serialize;

use crate::notification::NotificationTrigger;

/// A side effect that must be applied together with a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", content = "trigger", rename_all = "snake_case")]
pub enum Effect {
    /// Insert the enrollment derived from the registration request.
    CreateEnrollment,
    /// The request's hours now count toward the volunteer's total.
    ///
    /// Totals are summed from approved rows on read, so the status write
    /// itself realizes this effect.
    CreditHours,
    /// Emit the notifications listed for this trigger.
    Notify(NotificationTrigger),
}

/// The computed outcome of a legal transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision<S> {
    /// Status the request must still have for the write to apply.
    pub from: S,
    /// Status after the transition.
    pub to: S,
    /// Effects to persist in the same atomic write.
    pub effects: Vec<Effect>,
}

impl<S> Decision<S> {
    pub(crate) fn new(from: S, to: S, effects: Vec<Effect>) -> Self {
        Self { from, to, effects }
    }

    /// Whether the decision includes the given effect.
    pub fn has_effect(&self, effect: Effect) -> bool {
        self.effects.contains(&effect)
    }

    /// Notification triggers in declaration order.
    pub fn triggers(&self) -> impl Iterator<Item = NotificationTrigger> + '_ {
        self.effects.iter().filter_map(|e| match e {
            Effect::Notify(trigger) => Some(*trigger),
            Effect::CreateEnrollment | Effect::CreditHours => None,
        })
    }
}
