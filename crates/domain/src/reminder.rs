use crate::shared::entity::{Entity, ID};

/// A user's opt-in to be reminded about an `Event`.
///
/// There is at most one `ReminderSubscription` per user and event. Opting out
/// only deactivates it so that the history is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderSubscription {
    pub id: ID,
    /// Id of the user given by the authentication provider
    pub user_id: String,
    pub event_id: ID,
    /// Whether the reminder is currently active
    pub is_applied: bool,
    /// Timestamp in millis of the last activation
    pub applied_at: i64,
    /// Set once, after the reminder email was delivered
    pub reminder_sent: bool,
    /// While set and in the future a dispatcher run owns this subscription
    /// and other runs must leave it alone
    pub claimed_until: Option<i64>,
}

impl ReminderSubscription {
    pub fn new(user_id: impl Into<String>, event_id: ID, now: i64) -> Self {
        Self {
            id: Default::default(),
            user_id: user_id.into(),
            event_id,
            is_applied: true,
            applied_at: now,
            reminder_sent: false,
            claimed_until: None,
        }
    }

    /// Active and not yet reminded
    pub fn is_pending(&self) -> bool {
        self.is_applied && !self.reminder_sent
    }

    pub fn is_claimed(&self, now: i64) -> bool {
        matches!(self.claimed_until, Some(until) if until >= now)
    }

    /// Flips the reminder on or off and returns the new state.
    ///
    /// `reminder_sent` is left untouched so a reminder that was already
    /// delivered is not sent again after opting out and back in.
    pub fn toggle(&mut self, now: i64) -> bool {
        self.is_applied = !self.is_applied;
        if self.is_applied {
            self.applied_at = now;
        }
        self.is_applied
    }
}

impl Entity for ReminderSubscription {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_subscription_is_pending() {
        let subscription = ReminderSubscription::new("user", ID::new(), 10);
        assert!(subscription.is_pending());
        assert_eq!(subscription.applied_at, 10);
        assert!(!subscription.is_claimed(10));
    }

    #[test]
    fn toggle_keeps_history() {
        let mut subscription = ReminderSubscription::new("user", ID::new(), 10);
        assert!(!subscription.toggle(20));
        assert_eq!(subscription.applied_at, 10);
        assert!(!subscription.is_pending());

        assert!(subscription.toggle(30));
        assert_eq!(subscription.applied_at, 30);
        assert!(subscription.is_pending());
    }

    #[test]
    fn reactivation_does_not_reset_sent_flag() {
        let mut subscription = ReminderSubscription::new("user", ID::new(), 10);
        subscription.reminder_sent = true;
        subscription.toggle(20);
        subscription.toggle(30);
        assert!(subscription.reminder_sent);
        assert!(!subscription.is_pending());
    }

    #[test]
    fn claim_expires() {
        let mut subscription = ReminderSubscription::new("user", ID::new(), 10);
        subscription.claimed_until = Some(100);
        assert!(subscription.is_claimed(100));
        assert!(!subscription.is_claimed(101));
    }
}
