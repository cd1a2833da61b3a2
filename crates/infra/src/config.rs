use eventura_domain::AdminEmails;
use eventura_utils::create_random_secret;
use std::{fmt::Display, str::FromStr, time::Duration};
use tracing::{info, warn};

const DEFAULT_ZEPTOMAIL_API_URL: &str = "https://api.zeptomail.in/v1.1/email";
const DEFAULT_JOB_INTERVAL_SECS: u64 = 60 * 60;
const DEFAULT_REMINDER_CLAIM_LEASE_SECS: i64 = 10 * 60;
const DEFAULT_MAILER_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret that has to be provided in the `eventura-api-key` header
    /// to trigger jobs and to use the admin routes
    pub api_key: String,
    /// Port for the application to run on
    pub port: usize,
    /// Emails that are granted the admin role when their profile is created
    pub admin_emails: AdminEmails,
    /// How often the lifecycle and reminder jobs run
    pub job_interval_secs: u64,
    /// How long a dispatcher run may hold a subscription before another
    /// run is allowed to retry it. Covers crashes between send and confirm.
    pub reminder_claim_lease_millis: i64,
    pub mailer: MailerConfig,
}

#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// When missing, emails are only logged
    pub zeptomail_token: Option<String>,
    pub api_url: String,
    pub from_email: String,
    pub from_name: String,
    /// Upper bound for a single request to the provider. Always well below
    /// the claim lease, so a send finishes before its claim can expire.
    pub request_timeout: Duration,
}

impl Config {
    pub fn new() -> Self {
        let api_key = match std::env::var("EVENTURA_API_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find EVENTURA_API_KEY environment variable. Going to create one.");
                let key = create_random_secret(32);
                info!(
                    "Api key for jobs and admin routes was generated and set to: {}",
                    key
                );
                key
            }
        };

        let admin_emails =
            AdminEmails::from_csv(&std::env::var("ADMIN_EMAILS").unwrap_or_default());
        if admin_emails.is_empty() {
            info!("No ADMIN_EMAILS configured. No profile will be made admin automatically.");
        }

        let job_interval_secs = parse_env_var("JOB_INTERVAL_SECS", DEFAULT_JOB_INTERVAL_SECS);
        let job_interval_secs = match job_interval_secs {
            0 => {
                warn!(
                    "JOB_INTERVAL_SECS must be positive, falling back to {}.",
                    DEFAULT_JOB_INTERVAL_SECS
                );
                DEFAULT_JOB_INTERVAL_SECS
            }
            secs => secs,
        };

        let reminder_claim_lease_millis = 1000
            * parse_env_var("REMINDER_CLAIM_LEASE_SECS", DEFAULT_REMINDER_CLAIM_LEASE_SECS);

        Self {
            api_key,
            port: parse_env_var("PORT", 5000),
            admin_emails,
            job_interval_secs,
            reminder_claim_lease_millis,
            mailer: MailerConfig::new(reminder_claim_lease_millis),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl MailerConfig {
    pub fn new(claim_lease_millis: i64) -> Self {
        let request_timeout = request_timeout_for_lease(
            parse_env_var("ZEPTOMAIL_TIMEOUT_SECS", DEFAULT_MAILER_TIMEOUT_SECS),
            claim_lease_millis,
        );
        Self {
            zeptomail_token: std::env::var("ZEPTOMAIL_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            api_url: std::env::var("ZEPTOMAIL_API_URL")
                .unwrap_or_else(|_| DEFAULT_ZEPTOMAIL_API_URL.into()),
            from_email: std::env::var("ZEPTOMAIL_FROM_EMAIL")
                .unwrap_or_else(|_| "alerts@eventura.live".into()),
            from_name: std::env::var("ZEPTOMAIL_FROM_NAME").unwrap_or_else(|_| "Eventura".into()),
            request_timeout,
        }
    }
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REMINDER_CLAIM_LEASE_SECS * 1000)
    }
}

/// The requested timeout, capped at half the claim lease and at least one second
pub fn request_timeout_for_lease(requested_secs: u64, claim_lease_millis: i64) -> Duration {
    let requested = Duration::from_secs(requested_secs.max(1));
    let cap = Duration::from_millis((claim_lease_millis / 2).max(1000) as u64);
    requested.min(cap)
}

fn parse_env_var<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match std::env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, raw, default
                );
                default
            }
        },
        Err(_) => default,
    }
}
