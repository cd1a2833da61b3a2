pub mod auto_transition_past_events;
mod create_event;
mod update_event;

use actix_web::web;
use auto_transition_past_events::auto_transition_past_events_controller;
use create_event::create_event_controller;
use update_event::update_event_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/jobs/transition-past-events",
        web::post().to(auto_transition_past_events_controller),
    );
    cfg.route("/events", web::post().to(create_event_controller));
    cfg.route("/events/{event_id}", web::put().to(update_event_controller));
}
