mod error;
mod event;
mod job_schedulers;
mod profile;
mod reminder;
mod shared;
mod status;

use actix_web::{dev::Server, web, App, HttpServer};
use eventura_infra::EventuraContext;
use job_schedulers::{start_send_upcoming_reminders_job, start_transition_past_events_job};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub use shared::auth::API_KEY_HEADER;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    event::configure_routes(cfg);
    profile::configure_routes(cfg);
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: EventuraContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        Application::start_job_schedulers(context);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: EventuraContext) {
        start_transition_past_events_job(context.clone());
        start_send_upcoming_reminders_job(context);
    }

    async fn configure_server(context: EventuraContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
