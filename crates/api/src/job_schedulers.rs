use crate::{
    event::auto_transition_past_events::AutoTransitionPastEventsUseCase,
    reminder::send_upcoming_reminders::SendUpcomingRemindersUseCase,
    shared::usecase::execute,
};
use actix_web::rt::time::{interval_at, Instant};
use eventura_infra::EventuraContext;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use tracing::{info, warn};

/// Seconds until the next multiple of `interval_secs` since the epoch, so
/// that runs line up with wall clock boundaries (e.g. the top of the hour)
pub fn get_start_delay(now_ts: i64, interval_secs: u64) -> u64 {
    let now_secs = (now_ts / 1000) as u64;
    interval_secs - now_secs % interval_secs
}

/// Allows at most one run of a job at a time
#[derive(Clone, Default)]
struct SingleFlight(Arc<AtomicBool>);

/// Marks the run as finished when dropped
struct InFlight(Arc<AtomicBool>);

impl SingleFlight {
    fn try_start(&self) -> Option<InFlight> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(self.0.clone()))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn first_tick(ctx: &EventuraContext) -> Instant {
    let now = ctx.sys.get_timestamp_millis();
    let secs_to_next_run = get_start_delay(now, ctx.config.job_interval_secs);
    Instant::now() + Duration::from_secs(secs_to_next_run)
}

pub fn start_transition_past_events_job(ctx: EventuraContext) {
    actix_web::rt::spawn(async move {
        let period = Duration::from_secs(ctx.config.job_interval_secs);
        let mut interval = interval_at(first_tick(&ctx), period);
        loop {
            interval.tick().await;
            // Errors are logged by execute
            if let Ok(transitioned) = execute(AutoTransitionPastEventsUseCase, &ctx).await {
                info!("Scheduled transition moved {} event(s) to past", transitioned);
            }
        }
    });
}

pub fn start_send_upcoming_reminders_job(ctx: EventuraContext) {
    actix_web::rt::spawn(async move {
        let period = Duration::from_secs(ctx.config.job_interval_secs);
        let mut interval = interval_at(first_tick(&ctx), period);
        let single_flight = SingleFlight::default();
        loop {
            interval.tick().await;
            let in_flight = match single_flight.try_start() {
                Some(in_flight) => in_flight,
                None => {
                    warn!("Previous reminder run is still in progress, skipping this tick");
                    continue;
                }
            };
            let context = ctx.clone();
            actix_web::rt::spawn(async move {
                let _ = execute(SendUpcomingRemindersUseCase, &context).await;
                drop(in_flight);
            });
        }
    });
}
