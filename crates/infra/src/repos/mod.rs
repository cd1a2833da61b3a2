mod event;
mod reminder_subscription;
mod shared;
mod user_profile;

use event::{InMemoryEventRepo, PostgresEventRepo};
use reminder_subscription::{InMemoryReminderSubscriptionRepo, PostgresReminderSubscriptionRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use user_profile::{InMemoryUserProfileRepo, PostgresUserProfileRepo};

pub use event::IEventRepo;
pub use reminder_subscription::IReminderSubscriptionRepo;
pub use user_profile::IUserProfileRepo;

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
    pub reminder_subscriptions: Arc<dyn IReminderSubscriptionRepo>,
    pub user_profiles: Arc<dyn IUserProfileRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        Ok(Self {
            events: Arc::new(PostgresEventRepo::new(pool.clone())),
            reminder_subscriptions: Arc::new(PostgresReminderSubscriptionRepo::new(pool.clone())),
            user_profiles: Arc::new(PostgresUserProfileRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            events: Arc::new(InMemoryEventRepo::new()),
            reminder_subscriptions: Arc::new(InMemoryReminderSubscriptionRepo::new()),
            user_profiles: Arc::new(InMemoryUserProfileRepo::new()),
        }
    }
}
