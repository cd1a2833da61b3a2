mod send_reminder;
pub mod send_upcoming_reminders;
mod toggle_reminder;

use actix_web::web;
use send_reminder::send_reminder_controller;
use send_upcoming_reminders::send_upcoming_reminders_controller;
use toggle_reminder::toggle_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/jobs/send-upcoming-reminders",
        web::post().to(send_upcoming_reminders_controller),
    );
    cfg.route(
        "/events/{event_id}/reminders/{user_id}",
        web::put().to(toggle_reminder_controller),
    );
    cfg.route(
        "/events/{event_id}/reminders/{user_id}/send",
        web::post().to(send_reminder_controller),
    );
}
