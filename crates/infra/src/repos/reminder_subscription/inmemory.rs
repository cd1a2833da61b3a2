use super::IReminderSubscriptionRepo;
use crate::repos::shared::inmemory_repo::*;
use anyhow::anyhow;
use eventura_domain::{ReminderSubscription, ID};

pub struct InMemoryReminderSubscriptionRepo {
    subscriptions: std::sync::Mutex<Vec<ReminderSubscription>>,
}

impl InMemoryReminderSubscriptionRepo {
    pub fn new() -> Self {
        Self {
            subscriptions: std::sync::Mutex::new(Vec::new()),
        }
    }

    fn update<R, F: FnOnce(&mut ReminderSubscription) -> R>(
        &self,
        subscription_id: &ID,
        update: F,
    ) -> anyhow::Result<R> {
        update_one(subscription_id, &self.subscriptions, update).ok_or_else(|| {
            anyhow!(
                "Reminder subscription with id: {} was not found",
                subscription_id
            )
        })
    }
}

#[async_trait::async_trait]
impl IReminderSubscriptionRepo for InMemoryReminderSubscriptionRepo {
    async fn insert(&self, subscription: &ReminderSubscription) -> anyhow::Result<()> {
        let inserted = insert_unique(subscription, &self.subscriptions, |s| {
            s.user_id == subscription.user_id && s.event_id == subscription.event_id
        });
        if !inserted {
            return Err(anyhow!(
                "User: {} is already subscribed to event: {}",
                subscription.user_id,
                subscription.event_id
            ));
        }
        Ok(())
    }

    async fn find(&self, subscription_id: &ID) -> Option<ReminderSubscription> {
        find(subscription_id, &self.subscriptions)
    }

    async fn find_by_user_and_event(
        &self,
        user_id: &str,
        event_id: &ID,
    ) -> Option<ReminderSubscription> {
        find_by(&self.subscriptions, |s| {
            s.user_id == user_id && s.event_id == *event_id
        })
        .into_iter()
        .next()
    }

    async fn find_pending(&self) -> anyhow::Result<Vec<ReminderSubscription>> {
        Ok(find_by(&self.subscriptions, |s| s.is_pending()))
    }

    async fn set_applied(
        &self,
        subscription_id: &ID,
        is_applied: bool,
        applied_at: i64,
    ) -> anyhow::Result<()> {
        self.update(subscription_id, |s| {
            s.is_applied = is_applied;
            s.applied_at = applied_at;
        })
    }

    async fn try_claim(
        &self,
        subscription_id: &ID,
        now: i64,
        claim_until: i64,
    ) -> anyhow::Result<bool> {
        self.update(subscription_id, |s| {
            if !s.is_pending() || s.is_claimed(now) {
                return false;
            }
            s.claimed_until = Some(claim_until);
            true
        })
    }

    async fn release_claim(&self, subscription_id: &ID) -> anyhow::Result<()> {
        self.update(subscription_id, |s| s.claimed_until = None)
    }

    async fn mark_sent(&self, subscription_id: &ID) -> anyhow::Result<()> {
        self.update(subscription_id, |s| {
            s.reminder_sent = true;
            s.claimed_until = None;
        })
    }
}
