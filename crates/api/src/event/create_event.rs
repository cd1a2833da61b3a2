use crate::{
    error::EventuraError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventura_api_structs::create_event::{APIResponse, RequestBody};
use eventura_domain::{Event, EventStatus};
use eventura_infra::EventuraContext;

pub async fn create_event_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<EventuraContext>,
) -> Result<HttpResponse, EventuraError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let mut event = Event::new(body.title, body.event_date);
    event.description = body.description;
    event.event_time = body.event_time;
    event.application_deadline = body.application_deadline;
    event.status = body.status.unwrap_or(EventStatus::Upcoming);
    event.location = body.location;
    event.category = body.category;
    event.organizer = body.organizer;
    event.registration_link = body.registration_link;
    event.max_participants = body.max_participants;
    event.created_by = body.created_by;

    let usecase = CreateEventUseCase { event };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Created().json(APIResponse::new(event)))
        .map_err(EventuraError::from)
}

/// Stores a new event with whatever status the administrator picked
#[derive(Debug)]
pub struct CreateEventUseCase {
    pub event: Event,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidData(String),
    StorageError,
}

impl From<UseCaseError> for EventuraError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidData(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// Title and event date are the only fields an event cannot do without
pub(crate) fn validate_event(event: &Event) -> Result<(), String> {
    if event.title.trim().is_empty() {
        return Err("The event title must not be empty".into());
    }
    if event.event_date.trim().is_empty() {
        return Err("The event date must not be empty".into());
    }
    Ok(())
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEventUseCase {
    type Response = Event;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &EventuraContext) -> Result<Self::Response, Self::Error> {
        validate_event(&self.event).map_err(UseCaseError::InvalidData)?;

        ctx.repos
            .events
            .insert(&self.event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(self.event.clone())
    }
}
