use crate::{
    error::EventuraError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventura_api_structs::transition_past_events::APIResponse;
use eventura_domain::{Cutoff, EventStatus};
use eventura_infra::EventuraContext;
use tracing::{error, info};

pub async fn auto_transition_past_events_controller(
    http_req: HttpRequest,
    ctx: web::Data<EventuraContext>,
) -> Result<HttpResponse, EventuraError> {
    protect_admin_route(&http_req, &ctx)?;

    execute(AutoTransitionPastEventsUseCase, &ctx)
        .await
        .map(|transitioned| HttpResponse::Ok().json(APIResponse { transitioned }))
        .map_err(EventuraError::from)
}

/// Moves every upcoming event whose effective cutoff has passed to `past`.
///
/// Running it again right away transitions nothing, and an event that was
/// manually moved back to upcoming is moved to past again on the next run.
#[derive(Debug)]
pub struct AutoTransitionPastEventsUseCase;

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
impl UseCase for AutoTransitionPastEventsUseCase {
    /// Number of events that were transitioned
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "AutoTransitionPastEvents";

    async fn execute(&mut self, ctx: &EventuraContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let events = ctx
            .repos
            .events
            .find_by_status(EventStatus::Upcoming)
            .await
            .map_err(|e| {
                error!("Unable to load upcoming events: {:?}", e);
                UseCaseError::StorageError
            })?;

        let mut transitioned = 0;
        for event in events {
            let cutoff = match event.cutoff() {
                Cutoff::At(cutoff) => cutoff,
                Cutoff::Missing | Cutoff::Cancelled => continue,
            };
            if !cutoff.has_elapsed(now) {
                continue;
            }

            match ctx
                .repos
                .events
                .set_status(&event.id, EventStatus::Past)
                .await
            {
                Ok(()) => transitioned += 1,
                Err(e) => error!(
                    "Unable to transition event {} ({}) to past: {:?}",
                    event.id, event.title, e
                ),
            }
        }

        if transitioned > 0 {
            info!("Transitioned {} event(s) to past", transitioned);
        }
        Ok(transitioned)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::testing::*;
    use eventura_domain::Event;
    use std::sync::Arc;

    async fn status_of(ctx: &EventuraContext, event: &Event) -> EventStatus {
        ctx.repos.events.find(&event.id).await.unwrap().status
    }

    #[actix_web::main]
    #[test]
    async fn transitions_events_with_elapsed_cutoff() {
        let TestContext { ctx, .. } =
            setup_test_context("2025-03-09T12:00:00Z", ScriptedMailer::default());
        let mut with_deadline = Event::new("Hack Night", "2025-03-20");
        with_deadline.application_deadline = Some("2025-03-08".into());
        let with_deadline = insert_event(&ctx, with_deadline).await;
        let without_deadline = insert_event(&ctx, Event::new("Career Fair", "2025-03-09")).await;
        let future = insert_event(&ctx, Event::new("Robotics Expo", "2025-03-10")).await;
        let mut future_deadline = Event::new("Design Sprint", "2025-03-01");
        future_deadline.application_deadline = Some("2025-03-12".into());
        let future_deadline = insert_event(&ctx, future_deadline).await;

        let res = execute(AutoTransitionPastEventsUseCase, &ctx).await.unwrap();

        assert_eq!(res, 2);
        assert_eq!(status_of(&ctx, &with_deadline).await, EventStatus::Past);
        assert_eq!(status_of(&ctx, &without_deadline).await, EventStatus::Past);
        assert_eq!(status_of(&ctx, &future).await, EventStatus::Upcoming);
        // The deadline decides, even though the event date has passed
        assert_eq!(status_of(&ctx, &future_deadline).await, EventStatus::Upcoming);
    }

    #[actix_web::main]
    #[test]
    async fn second_run_transitions_nothing() {
        let TestContext { ctx, .. } =
            setup_test_context("2025-03-09T12:00:00Z", ScriptedMailer::default());
        insert_event(&ctx, Event::new("Career Fair", "2025-03-01")).await;

        assert_eq!(execute(AutoTransitionPastEventsUseCase, &ctx).await.unwrap(), 1);
        assert_eq!(execute(AutoTransitionPastEventsUseCase, &ctx).await.unwrap(), 0);
    }

    #[actix_web::main]
    #[test]
    async fn cutoff_at_now_has_not_elapsed() {
        let TestContext { ctx, .. } =
            setup_test_context("2025-03-09T00:00:00Z", ScriptedMailer::default());
        let event = insert_event(&ctx, Event::new("Career Fair", "2025-03-09")).await;

        assert_eq!(execute(AutoTransitionPastEventsUseCase, &ctx).await.unwrap(), 0);
        assert_eq!(status_of(&ctx, &event).await, EventStatus::Upcoming);
    }

    #[actix_web::main]
    #[test]
    async fn leaves_cancelled_and_unreadable_events_alone() {
        let TestContext { ctx, .. } =
            setup_test_context("2025-03-09T12:00:00Z", ScriptedMailer::default());
        let mut cancelled = Event::new("Career Fair", "2025-03-01");
        cancelled.status = EventStatus::Cancelled;
        let cancelled = insert_event(&ctx, cancelled).await;
        let unreadable = insert_event(&ctx, Event::new("Mystery Meetup", "soon")).await;

        assert_eq!(execute(AutoTransitionPastEventsUseCase, &ctx).await.unwrap(), 0);
        assert_eq!(status_of(&ctx, &cancelled).await, EventStatus::Cancelled);
        assert_eq!(status_of(&ctx, &unreadable).await, EventStatus::Upcoming);
    }

    #[actix_web::main]
    #[test]
    async fn unparsable_deadline_falls_back_to_event_date() {
        let TestContext { ctx, .. } =
            setup_test_context("2025-03-09T12:00:00Z", ScriptedMailer::default());
        let mut event = Event::new("Career Fair", "2025-03-01");
        event.application_deadline = Some("next friday".into());
        let event = insert_event(&ctx, event).await;

        assert_eq!(execute(AutoTransitionPastEventsUseCase, &ctx).await.unwrap(), 1);
        assert_eq!(status_of(&ctx, &event).await, EventStatus::Past);
    }

    #[actix_web::main]
    #[test]
    async fn moves_manually_reverted_event_back_to_past() {
        let TestContext { ctx, .. } =
            setup_test_context("2025-03-09T12:00:00Z", ScriptedMailer::default());
        let event = insert_event(&ctx, Event::new("Career Fair", "2025-03-01")).await;
        execute(AutoTransitionPastEventsUseCase, &ctx).await.unwrap();
        ctx.repos
            .events
            .set_status(&event.id, EventStatus::Upcoming)
            .await
            .unwrap();

        assert_eq!(execute(AutoTransitionPastEventsUseCase, &ctx).await.unwrap(), 1);
        assert_eq!(status_of(&ctx, &event).await, EventStatus::Past);
    }

    #[actix_web::main]
    #[test]
    async fn continues_after_failed_write() {
        let TestContext { mut ctx, .. } =
            setup_test_context("2025-03-09T12:00:00Z", ScriptedMailer::default());
        let first = Event::new("Career Fair", "2025-03-01");
        let second = Event::new("Hack Night", "2025-03-02");
        ctx.repos.events = Arc::new(FailingStatusEventRepo {
            inner: ctx.repos.events.clone(),
            failing: vec![first.id.clone()],
        });
        let first = insert_event(&ctx, first).await;
        let second = insert_event(&ctx, second).await;

        assert_eq!(execute(AutoTransitionPastEventsUseCase, &ctx).await.unwrap(), 1);
        assert_eq!(status_of(&ctx, &first).await, EventStatus::Upcoming);
        assert_eq!(status_of(&ctx, &second).await, EventStatus::Past);
    }
}
