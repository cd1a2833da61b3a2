use chrono::{TimeZone, Utc};
use eventura_domain::{parse_timestamp, Event, EventStatus, ReminderSubscription, UserProfile, ID};
use eventura_infra::{
    DeliveryReceipt, EventuraContext, IEventRepo, IMailer, IReminderSubscriptionRepo, ISys,
    MailerError, OutboundEmail,
};
use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

pub struct StaticTimeSys(pub i64);

impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0
    }
}

/// Records every email it accepts and fails for the configured recipients
#[derive(Default)]
pub struct ScriptedMailer {
    failing_recipients: HashSet<String>,
    sent: Mutex<Vec<OutboundEmail>>,
}

impl ScriptedMailer {
    pub fn failing_for(emails: &[&str]) -> Self {
        Self {
            failing_recipients: emails.iter().map(|e| e.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IMailer for ScriptedMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, MailerError> {
        if email
            .to
            .iter()
            .any(|r| self.failing_recipients.contains(&r.email))
        {
            return Err(MailerError::Rejected {
                status: 500,
                body: "Scripted failure".into(),
            });
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(DeliveryReceipt {
            message: format!("Email sent to {}", email.recipient_list()),
        })
    }
}

/// Fails every status update for the given events
pub struct FailingStatusEventRepo {
    pub inner: Arc<dyn IEventRepo>,
    pub failing: Vec<ID>,
}

#[async_trait::async_trait]
impl IEventRepo for FailingStatusEventRepo {
    async fn insert(&self, e: &Event) -> anyhow::Result<()> {
        self.inner.insert(e).await
    }

    async fn find(&self, event_id: &ID) -> Option<Event> {
        self.inner.find(event_id).await
    }

    async fn find_by_status(&self, status: EventStatus) -> anyhow::Result<Vec<Event>> {
        self.inner.find_by_status(status).await
    }

    async fn save(&self, e: &Event) -> anyhow::Result<()> {
        self.inner.save(e).await
    }

    async fn set_status(&self, event_id: &ID, status: EventStatus) -> anyhow::Result<()> {
        if self.failing.contains(event_id) {
            return Err(anyhow::anyhow!("Scripted failure"));
        }
        self.inner.set_status(event_id, status).await
    }
}

/// Fails claiming or marking as sent for the given subscriptions
pub struct FailingSubscriptionRepo {
    pub inner: Arc<dyn IReminderSubscriptionRepo>,
    pub failing_claims: Vec<ID>,
    pub failing_marks: Vec<ID>,
}

#[async_trait::async_trait]
impl IReminderSubscriptionRepo for FailingSubscriptionRepo {
    async fn insert(&self, subscription: &ReminderSubscription) -> anyhow::Result<()> {
        self.inner.insert(subscription).await
    }

    async fn find(&self, subscription_id: &ID) -> Option<ReminderSubscription> {
        self.inner.find(subscription_id).await
    }

    async fn find_by_user_and_event(
        &self,
        user_id: &str,
        event_id: &ID,
    ) -> Option<ReminderSubscription> {
        self.inner.find_by_user_and_event(user_id, event_id).await
    }

    async fn find_pending(&self) -> anyhow::Result<Vec<ReminderSubscription>> {
        self.inner.find_pending().await
    }

    async fn set_applied(
        &self,
        subscription_id: &ID,
        is_applied: bool,
        applied_at: i64,
    ) -> anyhow::Result<()> {
        self.inner
            .set_applied(subscription_id, is_applied, applied_at)
            .await
    }

    async fn try_claim(
        &self,
        subscription_id: &ID,
        now: i64,
        claim_until: i64,
    ) -> anyhow::Result<bool> {
        if self.failing_claims.contains(subscription_id) {
            return Err(anyhow::anyhow!("Scripted failure"));
        }
        self.inner.try_claim(subscription_id, now, claim_until).await
    }

    async fn release_claim(&self, subscription_id: &ID) -> anyhow::Result<()> {
        self.inner.release_claim(subscription_id).await
    }

    async fn mark_sent(&self, subscription_id: &ID) -> anyhow::Result<()> {
        if self.failing_marks.contains(subscription_id) {
            return Err(anyhow::anyhow!("Scripted failure"));
        }
        self.inner.mark_sent(subscription_id).await
    }
}

pub struct TestContext {
    pub ctx: EventuraContext,
    pub mailer: Arc<ScriptedMailer>,
}

pub fn setup_test_context(now: &str, mailer: ScriptedMailer) -> TestContext {
    let mailer = Arc::new(mailer);
    let mut ctx = EventuraContext::create_inmemory();
    ctx.sys = Arc::new(StaticTimeSys(ts(now)));
    ctx.mailer = mailer.clone();
    TestContext { ctx, mailer }
}

pub fn ts(raw: &str) -> i64 {
    parse_timestamp(raw).unwrap()
}

/// Millis as an RFC 3339 string, the way date inputs store them
pub fn date_string(timestamp: i64) -> String {
    Utc.timestamp_millis_opt(timestamp).unwrap().to_rfc3339()
}

pub async fn insert_event(ctx: &EventuraContext, event: Event) -> Event {
    ctx.repos.events.insert(&event).await.unwrap();
    event
}

pub async fn insert_profile(ctx: &EventuraContext, user_id: &str, email: &str) -> UserProfile {
    let profile = UserProfile::new(user_id, format!("Student {}", user_id), email);
    ctx.repos.user_profiles.insert(&profile).await.unwrap();
    profile
}

pub async fn subscribe(
    ctx: &EventuraContext,
    user_id: &str,
    event: &Event,
) -> ReminderSubscription {
    let subscription =
        ReminderSubscription::new(user_id, event.id.clone(), ctx.sys.get_timestamp_millis());
    ctx.repos
        .reminder_subscriptions
        .insert(&subscription)
        .await
        .unwrap();
    subscription
}

pub async fn stored_subscription(
    ctx: &EventuraContext,
    subscription: &ReminderSubscription,
) -> ReminderSubscription {
    ctx.repos
        .reminder_subscriptions
        .find(&subscription.id)
        .await
        .unwrap()
}
