use super::create_event::validate_event;
use crate::{
    error::EventuraError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventura_api_structs::update_event::{APIResponse, PathParams, RequestBody};
use eventura_domain::{Event, ID};
use eventura_infra::EventuraContext;
use tracing::info;

pub async fn update_event_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<EventuraContext>,
) -> Result<HttpResponse, EventuraError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = UpdateEventUseCase {
        event_id: path.event_id.clone(),
        patch: body.0,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(EventuraError::from)
}

/// Edits an event. Any status can be set, including moving a past event back
/// to upcoming.
#[derive(Debug)]
pub struct UpdateEventUseCase {
    pub event_id: ID,
    pub patch: RequestBody,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidData(String),
    StorageError,
}

impl From<UseCaseError> for EventuraError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::InvalidData(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

fn apply_patch(event: &mut Event, patch: &mut RequestBody) {
    if let Some(title) = patch.title.take() {
        event.title = title;
    }
    if let Some(event_date) = patch.event_date.take() {
        event.event_date = event_date;
    }
    if let Some(status) = patch.status {
        event.status = status;
    }
    if let Some(category) = patch.category {
        event.category = Some(category);
    }
    if let Some(max_participants) = patch.max_participants {
        event.max_participants = Some(max_participants);
    }
    for (field, value) in [
        (&mut event.description, patch.description.take()),
        (&mut event.event_time, patch.event_time.take()),
        (&mut event.application_deadline, patch.application_deadline.take()),
        (&mut event.location, patch.location.take()),
        (&mut event.organizer, patch.organizer.take()),
        (&mut event.registration_link, patch.registration_link.take()),
    ] {
        if value.is_some() {
            *field = value;
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateEventUseCase {
    type Response = Event;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateEvent";

    async fn execute(&mut self, ctx: &EventuraContext) -> Result<Self::Response, Self::Error> {
        let mut event = ctx
            .repos
            .events
            .find(&self.event_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.event_id.clone()))?;
        let previous_status = event.status;

        apply_patch(&mut event, &mut self.patch);
        validate_event(&event).map_err(UseCaseError::InvalidData)?;

        ctx.repos
            .events
            .save(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if event.status != previous_status {
            info!(
                "Event {} was moved from {} to {}",
                event.id,
                previous_status.as_str(),
                event.status.as_str()
            );
        }

        Ok(event)
    }
}
