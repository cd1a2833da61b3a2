mod create_profile;

use actix_web::web;
use create_profile::create_profile_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/profiles", web::post().to(create_profile_controller));
}
