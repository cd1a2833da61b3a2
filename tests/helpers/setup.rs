use eventura_api::{Application, API_KEY_HEADER};
use eventura_infra::EventuraContext;
use reqwest::{Client, RequestBuilder};

pub struct TestApp {
    /// Shares the repositories with the running application
    pub ctx: EventuraContext,
    pub address: String,
    client: Client,
}

impl TestApp {
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(format!("{}/api/v1{}", self.address, path))
    }

    /// Request carrying the api key
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(format!("{}/api/v1{}", self.address, path))
            .header(API_KEY_HEADER, &self.ctx.config.api_key)
    }

    /// Request carrying the api key
    pub fn put(&self, path: &str) -> RequestBuilder {
        self.client
            .put(format!("{}/api/v1{}", self.address, path))
            .header(API_KEY_HEADER, &self.ctx.config.api_key)
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    let mut ctx = EventuraContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.api_key = "test-api-key".into();

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        ctx,
        address,
        client: Client::new(),
    }
}
