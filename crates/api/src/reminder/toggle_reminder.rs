use crate::{
    error::EventuraError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventura_api_structs::toggle_reminder::{APIResponse, PathParams};
use eventura_domain::{ReminderSubscription, ID};
use eventura_infra::EventuraContext;

pub async fn toggle_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<EventuraContext>,
) -> Result<HttpResponse, EventuraError> {
    protect_admin_route(&http_req, &ctx)?;

    let path = path.into_inner();
    let usecase = ToggleReminderUseCase {
        event_id: path.event_id,
        user_id: path.user_id,
    };
    execute(usecase, &ctx)
        .await
        .map(|is_applied| HttpResponse::Ok().json(APIResponse::new(is_applied)))
        .map_err(EventuraError::from)
}

/// Turns the user's reminder for an event on or off.
///
/// The subscription is created on first use and only deactivated afterwards,
/// so a reminder that was already delivered stays delivered.
#[derive(Debug)]
pub struct ToggleReminderUseCase {
    pub event_id: ID,
    pub user_id: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    EventNotFound(ID),
    InvalidUserId,
    StorageError,
}

impl From<UseCaseError> for EventuraError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EventNotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::InvalidUserId => {
                Self::BadClientData("The user id must not be empty".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ToggleReminderUseCase {
    /// Whether the reminder is active afterwards
    type Response = bool;

    type Error = UseCaseError;

    const NAME: &'static str = "ToggleReminder";

    async fn execute(&mut self, ctx: &EventuraContext) -> Result<Self::Response, Self::Error> {
        if self.user_id.trim().is_empty() {
            return Err(UseCaseError::InvalidUserId);
        }
        if ctx.repos.events.find(&self.event_id).await.is_none() {
            return Err(UseCaseError::EventNotFound(self.event_id.clone()));
        }

        let now = ctx.sys.get_timestamp_millis();
        let subscriptions = &ctx.repos.reminder_subscriptions;
        match subscriptions
            .find_by_user_and_event(&self.user_id, &self.event_id)
            .await
        {
            Some(mut subscription) => {
                let is_applied = subscription.toggle(now);
                subscriptions
                    .set_applied(&subscription.id, is_applied, subscription.applied_at)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                Ok(is_applied)
            }
            None => {
                let subscription =
                    ReminderSubscription::new(self.user_id.clone(), self.event_id.clone(), now);
                subscriptions
                    .insert(&subscription)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                Ok(true)
            }
        }
    }
}
