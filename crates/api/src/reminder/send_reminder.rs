use crate::{
    error::EventuraError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventura_api_structs::send_reminder::{APIResponse, PathParams};
use eventura_domain::{reminder_email::event_reminder, ID};
use eventura_infra::{DeliveryReceipt, EventuraContext, OutboundEmail, Recipient};
use thiserror::Error;

pub async fn send_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<EventuraContext>,
) -> Result<HttpResponse, EventuraError> {
    protect_admin_route(&http_req, &ctx)?;

    let path = path.into_inner();
    let usecase = SendReminderUseCase {
        event_id: path.event_id,
        user_id: path.user_id,
    };
    let res = match execute(usecase, &ctx).await {
        Ok(receipt) => APIResponse {
            success: true,
            message: receipt.message,
        },
        Err(e) => APIResponse {
            success: false,
            message: e.to_string(),
        },
    };
    Ok(HttpResponse::Ok().json(res))
}

/// Emails a reminder about an event to one user right away.
///
/// Unlike the scheduled reminders it ignores the deadline window and does not
/// record anything on the user's subscription.
#[derive(Debug)]
pub struct SendReminderUseCase {
    pub event_id: ID,
    pub user_id: String,
}

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("User not found or no email")]
    UserNotFound,
    #[error("Event not found")]
    EventNotFound,
    #[error("{0}")]
    DeliveryFailed(String),
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendReminderUseCase {
    type Response = DeliveryReceipt;

    type Error = UseCaseError;

    const NAME: &'static str = "SendReminder";

    async fn execute(&mut self, ctx: &EventuraContext) -> Result<Self::Response, Self::Error> {
        let profile = ctx
            .repos
            .user_profiles
            .find_by_user_id(&self.user_id)
            .await
            .ok_or(UseCaseError::UserNotFound)?;
        let email = profile
            .contact_email()
            .ok_or(UseCaseError::UserNotFound)?
            .to_string();

        let event = ctx
            .repos
            .events
            .find(&self.event_id)
            .await
            .ok_or(UseCaseError::EventNotFound)?;

        let content = event_reminder(&profile, &event);
        let outbound = OutboundEmail::new(
            Recipient {
                email,
                name: profile.full_name.clone(),
            },
            content.subject,
            content.html_body,
        );
        ctx.mailer
            .send(&outbound)
            .await
            .map_err(|e| UseCaseError::DeliveryFailed(e.to_string()))
    }
}
