use crate::{
    error::EventuraError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventura_api_structs::send_upcoming_reminders::APIResponse;
use eventura_domain::{
    reminder_email::upcoming_reminder, Cutoff, ReminderSubscription, ReminderWindow,
};
use eventura_infra::{EventuraContext, OutboundEmail, Recipient};
use tracing::{error, info, warn};

pub async fn send_upcoming_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<EventuraContext>,
) -> Result<HttpResponse, EventuraError> {
    protect_admin_route(&http_req, &ctx)?;

    execute(SendUpcomingRemindersUseCase, &ctx)
        .await
        .map(|summary| {
            HttpResponse::Ok().json(APIResponse::new(summary.candidates, summary.sent))
        })
        .map_err(EventuraError::from)
}

/// Emails every user with an active, not yet sent reminder whose event has
/// its effective cutoff within the next 24 hours.
///
/// Each subscription is claimed before sending so that overlapping runs do
/// not deliver the same reminder twice. A subscription is only marked as sent
/// after the mailer confirmed the delivery.
#[derive(Debug)]
pub struct SendUpcomingRemindersUseCase;

#[derive(Debug, PartialEq)]
pub struct DispatchSummary {
    /// Pending subscriptions that were considered
    pub candidates: usize,
    pub sent: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for EventuraError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendUpcomingRemindersUseCase {
    type Response = DispatchSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "SendUpcomingReminders";

    async fn execute(&mut self, ctx: &EventuraContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let window = ReminderWindow::starting_at(now);

        let candidates = ctx
            .repos
            .reminder_subscriptions
            .find_pending()
            .await
            .map_err(|e| {
                error!("Unable to load pending reminders: {:?}", e);
                UseCaseError::StorageError
            })?;

        let mut sent = 0;
        for subscription in &candidates {
            if deliver_reminder(subscription, &window, now, ctx).await {
                sent += 1;
            }
        }

        info!("Sent {} of {} pending reminder(s)", sent, candidates.len());
        Ok(DispatchSummary {
            candidates: candidates.len(),
            sent,
        })
    }
}

/// Returns whether the reminder was delivered
async fn deliver_reminder(
    subscription: &ReminderSubscription,
    window: &ReminderWindow,
    now: i64,
    ctx: &EventuraContext,
) -> bool {
    let event = match ctx.repos.events.find(&subscription.event_id).await {
        Some(event) => event,
        None => {
            warn!(
                "Skipping reminder {}: event {} was not found",
                subscription.id, subscription.event_id
            );
            return false;
        }
    };

    let cutoff = match event.cutoff() {
        Cutoff::At(cutoff) => cutoff,
        Cutoff::Cancelled => return false,
        Cutoff::Missing => {
            warn!(
                "Skipping reminder {}: event {} has no readable date",
                subscription.id, event.id
            );
            return false;
        }
    };
    if !window.contains(cutoff.timestamp) {
        return false;
    }

    let profile = match ctx
        .repos
        .user_profiles
        .find_by_user_id(&subscription.user_id)
        .await
    {
        Some(profile) => profile,
        None => {
            warn!(
                "Skipping reminder {}: no profile for user {}",
                subscription.id, subscription.user_id
            );
            return false;
        }
    };
    let email = match profile.contact_email() {
        Some(email) => email.to_string(),
        None => {
            warn!(
                "Skipping reminder {}: user {} has no email",
                subscription.id, subscription.user_id
            );
            return false;
        }
    };

    let claim_until = now + ctx.config.reminder_claim_lease_millis;
    match ctx
        .repos
        .reminder_subscriptions
        .try_claim(&subscription.id, now, claim_until)
        .await
    {
        Ok(true) => (),
        Ok(false) => {
            info!(
                "Skipping reminder {}: it is handled by another run",
                subscription.id
            );
            return false;
        }
        Err(e) => {
            error!("Unable to claim reminder {}: {:?}", subscription.id, e);
            return false;
        }
    }

    let content = upcoming_reminder(&profile, &event, &cutoff);
    let outbound = OutboundEmail::new(
        Recipient {
            email,
            name: profile.full_name.clone(),
        },
        content.subject,
        content.html_body,
    );

    match ctx.mailer.send(&outbound).await {
        Ok(receipt) => {
            info!(
                "Reminder {} for event {}: {}",
                subscription.id, event.id, receipt.message
            );
            // The email is out, so it counts even if recording it fails. The
            // claim then expires and the reminder may be sent again.
            if let Err(e) = ctx
                .repos
                .reminder_subscriptions
                .mark_sent(&subscription.id)
                .await
            {
                error!(
                    "Reminder {} was delivered but could not be marked as sent: {:?}",
                    subscription.id, e
                );
            }
            true
        }
        Err(e) => {
            error!(
                "Unable to send reminder for event {} to {}: {}",
                event.id,
                outbound.recipient_list(),
                e
            );
            if let Err(e) = ctx
                .repos
                .reminder_subscriptions
                .release_claim(&subscription.id)
                .await
            {
                error!("Unable to release claim on reminder {}: {:?}", subscription.id, e);
            }
            false
        }
    }
}
