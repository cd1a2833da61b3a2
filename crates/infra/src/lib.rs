mod config;
mod mailer;
mod repos;
mod system;

pub use config::{Config, MailerConfig};
pub use mailer::{
    create_mailer, DeliveryReceipt, IMailer, MailerError, OutboundEmail, PreviewMailer, Recipient,
    ZeptoMailer,
};
pub use repos::{IEventRepo, IReminderSubscriptionRepo, IUserProfileRepo, Repos};
use std::sync::Arc;
pub use system::{ISys, RealSys};
use tracing::warn;

#[derive(Clone)]
pub struct EventuraContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn IMailer>,
}

impl EventuraContext {
    /// Context without any external dependencies. Emails are only logged.
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            mailer: Arc::new(PreviewMailer {}),
        }
    }

    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let config = Config::new();
        let repos = match params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(&connection_string).await?,
            None => {
                warn!(
                    "{} env var was not found. Data will be stored in memory and lost on restart.",
                    PSQL_CONNECTION_STRING
                );
                Repos::create_inmemory()
            }
        };
        let mailer = create_mailer(&config.mailer)?;
        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            mailer,
        })
    }
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
}

const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<EventuraContext> {
    EventuraContext::create(ContextParams {
        postgres_connection_string: std::env::var(PSQL_CONNECTION_STRING).ok(),
    })
    .await
}
