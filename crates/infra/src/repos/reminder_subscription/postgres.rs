use super::IReminderSubscriptionRepo;
use anyhow::anyhow;
use eventura_domain::{ReminderSubscription, ID};
use sqlx::{postgres::PgQueryResult, types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresReminderSubscriptionRepo {
    pool: PgPool,
}

impl PostgresReminderSubscriptionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderSubscriptionRaw {
    subscription_uid: Uuid,
    user_id: String,
    event_uid: Uuid,
    is_applied: bool,
    applied_at: i64,
    reminder_sent: bool,
    claimed_until: Option<i64>,
}

impl From<ReminderSubscriptionRaw> for ReminderSubscription {
    fn from(raw: ReminderSubscriptionRaw) -> Self {
        Self {
            id: raw.subscription_uid.into(),
            user_id: raw.user_id,
            event_id: raw.event_uid.into(),
            is_applied: raw.is_applied,
            applied_at: raw.applied_at,
            reminder_sent: raw.reminder_sent,
            claimed_until: raw.claimed_until,
        }
    }
}

fn ensure_found(res: PgQueryResult, subscription_id: &ID) -> anyhow::Result<()> {
    if res.rows_affected() == 0 {
        return Err(anyhow!(
            "Reminder subscription with id: {} was not found",
            subscription_id
        ));
    }
    Ok(())
}

#[async_trait::async_trait]
impl IReminderSubscriptionRepo for PostgresReminderSubscriptionRepo {
    async fn insert(&self, s: &ReminderSubscription) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_subscriptions
            (subscription_uid, user_id, event_uid, is_applied, applied_at, reminder_sent, claimed_until)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(*s.id.inner_ref())
        .bind(&s.user_id)
        .bind(*s.event_id.inner_ref())
        .bind(s.is_applied)
        .bind(s.applied_at)
        .bind(s.reminder_sent)
        .bind(s.claimed_until)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, subscription_id: &ID) -> Option<ReminderSubscription> {
        let res = sqlx::query_as::<_, ReminderSubscriptionRaw>(
            r#"
            SELECT * FROM reminder_subscriptions AS r
            WHERE r.subscription_uid = $1
            "#,
        )
        .bind(*subscription_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(raw) => raw.map(|raw| raw.into()),
            Err(e) => {
                error!(
                    "Unable to find reminder subscription {}: {:?}",
                    subscription_id, e
                );
                None
            }
        }
    }

    async fn find_by_user_and_event(
        &self,
        user_id: &str,
        event_id: &ID,
    ) -> Option<ReminderSubscription> {
        let res = sqlx::query_as::<_, ReminderSubscriptionRaw>(
            r#"
            SELECT * FROM reminder_subscriptions AS r
            WHERE r.user_id = $1 AND r.event_uid = $2
            "#,
        )
        .bind(user_id)
        .bind(*event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(raw) => raw.map(|raw| raw.into()),
            Err(e) => {
                error!(
                    "Unable to find reminder subscription for user {} and event {}: {:?}",
                    user_id, event_id, e
                );
                None
            }
        }
    }

    async fn find_pending(&self) -> anyhow::Result<Vec<ReminderSubscription>> {
        let subscriptions = sqlx::query_as::<_, ReminderSubscriptionRaw>(
            r#"
            SELECT * FROM reminder_subscriptions AS r
            WHERE r.is_applied AND NOT r.reminder_sent
            ORDER BY r.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(subscriptions.into_iter().map(|raw| raw.into()).collect())
    }

    async fn set_applied(
        &self,
        subscription_id: &ID,
        is_applied: bool,
        applied_at: i64,
    ) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE reminder_subscriptions
            SET is_applied = $2, applied_at = $3
            WHERE subscription_uid = $1
            "#,
        )
        .bind(*subscription_id.inner_ref())
        .bind(is_applied)
        .bind(applied_at)
        .execute(&self.pool)
        .await?;

        ensure_found(res, subscription_id)
    }

    async fn try_claim(
        &self,
        subscription_id: &ID,
        now: i64,
        claim_until: i64,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE reminder_subscriptions
            SET claimed_until = $2
            WHERE subscription_uid = $1
                AND is_applied
                AND NOT reminder_sent
                AND (claimed_until IS NULL OR claimed_until < $3)
            "#,
        )
        .bind(*subscription_id.inner_ref())
        .bind(claim_until)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn release_claim(&self, subscription_id: &ID) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE reminder_subscriptions
            SET claimed_until = NULL
            WHERE subscription_uid = $1
            "#,
        )
        .bind(*subscription_id.inner_ref())
        .execute(&self.pool)
        .await?;

        ensure_found(res, subscription_id)
    }

    async fn mark_sent(&self, subscription_id: &ID) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE reminder_subscriptions
            SET reminder_sent = true, claimed_until = NULL
            WHERE subscription_uid = $1
            "#,
        )
        .bind(*subscription_id.inner_ref())
        .execute(&self.pool)
        .await?;

        ensure_found(res, subscription_id)
    }
}
