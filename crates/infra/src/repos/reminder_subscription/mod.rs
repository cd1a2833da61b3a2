mod inmemory;
mod postgres;

use eventura_domain::{ReminderSubscription, ID};
pub use inmemory::InMemoryReminderSubscriptionRepo;
pub use postgres::PostgresReminderSubscriptionRepo;

#[async_trait::async_trait]
pub trait IReminderSubscriptionRepo: Send + Sync {
    async fn insert(&self, subscription: &ReminderSubscription) -> anyhow::Result<()>;
    async fn find(&self, subscription_id: &ID) -> Option<ReminderSubscription>;
    async fn find_by_user_and_event(
        &self,
        user_id: &str,
        event_id: &ID,
    ) -> Option<ReminderSubscription>;
    /// Active subscriptions that have not been reminded yet, in store order
    async fn find_pending(&self) -> anyhow::Result<Vec<ReminderSubscription>>;
    /// Patches the activation fields only, `reminder_sent` is never touched here
    async fn set_applied(
        &self,
        subscription_id: &ID,
        is_applied: bool,
        applied_at: i64,
    ) -> anyhow::Result<()>;
    /// Atomically reserves a pending subscription for delivery until `claim_until`.
    ///
    /// Returns `false` if the subscription is no longer pending or another
    /// run holds a claim that has not expired at `now`.
    async fn try_claim(
        &self,
        subscription_id: &ID,
        now: i64,
        claim_until: i64,
    ) -> anyhow::Result<bool>;
    async fn release_claim(&self, subscription_id: &ID) -> anyhow::Result<()>;
    /// Records a confirmed delivery and drops the claim
    async fn mark_sent(&self, subscription_id: &ID) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finds_pending_subscriptions_only() {
        let repo = InMemoryReminderSubscriptionRepo::new();
        let pending = ReminderSubscription::new("user_1", ID::new(), 0);
        let mut withdrawn = ReminderSubscription::new("user_2", ID::new(), 0);
        withdrawn.is_applied = false;
        let mut sent = ReminderSubscription::new("user_3", ID::new(), 0);
        sent.reminder_sent = true;
        for subscription in [&pending, &withdrawn, &sent] {
            repo.insert(subscription).await.unwrap();
        }

        let res = repo.find_pending().await.unwrap();
        assert_eq!(res, vec![pending]);
    }

    #[tokio::test]
    async fn finds_by_user_and_event() {
        let repo = InMemoryReminderSubscriptionRepo::new();
        let event_id = ID::new();
        let subscription = ReminderSubscription::new("user_1", event_id.clone(), 0);
        repo.insert(&subscription).await.unwrap();

        assert_eq!(
            repo.find_by_user_and_event("user_1", &event_id).await,
            Some(subscription)
        );
        assert!(repo
            .find_by_user_and_event("user_2", &event_id)
            .await
            .is_none());
        assert!(repo
            .find_by_user_and_event("user_1", &ID::new())
            .await
            .is_none());
    }

    #[tokio::test]
    async fn claim_is_exclusive_until_released_or_expired() {
        let repo = InMemoryReminderSubscriptionRepo::new();
        let subscription = ReminderSubscription::new("user_1", ID::new(), 0);
        repo.insert(&subscription).await.unwrap();

        assert!(repo.try_claim(&subscription.id, 100, 200).await.unwrap());
        assert!(!repo.try_claim(&subscription.id, 150, 250).await.unwrap());
        // Lease expired
        assert!(repo.try_claim(&subscription.id, 201, 300).await.unwrap());

        repo.release_claim(&subscription.id).await.unwrap();
        assert!(repo.try_claim(&subscription.id, 202, 300).await.unwrap());
    }

    #[tokio::test]
    async fn sent_subscriptions_cannot_be_claimed() {
        let repo = InMemoryReminderSubscriptionRepo::new();
        let subscription = ReminderSubscription::new("user_1", ID::new(), 0);
        repo.insert(&subscription).await.unwrap();

        assert!(repo.try_claim(&subscription.id, 100, 200).await.unwrap());
        repo.mark_sent(&subscription.id).await.unwrap();

        let stored = repo.find(&subscription.id).await.expect("To find subscription");
        assert!(stored.reminder_sent);
        assert_eq!(stored.claimed_until, None);
        assert!(!repo.try_claim(&subscription.id, 300, 400).await.unwrap());
        assert!(repo.find_pending().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_applied_keeps_sent_flag() {
        let repo = InMemoryReminderSubscriptionRepo::new();
        let mut subscription = ReminderSubscription::new("user_1", ID::new(), 0);
        subscription.reminder_sent = true;
        repo.insert(&subscription).await.unwrap();

        repo.set_applied(&subscription.id, false, 0).await.unwrap();
        repo.set_applied(&subscription.id, true, 50).await.unwrap();

        let stored = repo.find(&subscription.id).await.expect("To find subscription");
        assert!(stored.is_applied);
        assert!(stored.reminder_sent);
        assert_eq!(stored.applied_at, 50);
    }

    #[tokio::test]
    async fn claiming_unknown_subscription_fails() {
        let repo = InMemoryReminderSubscriptionRepo::new();
        assert!(repo.try_claim(&ID::new(), 0, 10).await.is_err());
        assert!(repo.mark_sent(&ID::new()).await.is_err());
    }

    #[tokio::test]
    async fn rejects_second_subscription_for_same_user_and_event() {
        let repo = InMemoryReminderSubscriptionRepo::new();
        let event_id = ID::new();
        repo.insert(&ReminderSubscription::new("user_1", event_id.clone(), 0))
            .await
            .unwrap();

        assert!(repo
            .insert(&ReminderSubscription::new("user_1", event_id.clone(), 10))
            .await
            .is_err());
        repo.insert(&ReminderSubscription::new("user_2", event_id, 10))
            .await
            .unwrap();
        assert_eq!(repo.find_pending().await.unwrap().len(), 2);
    }
}
