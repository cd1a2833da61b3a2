use crate::error::EventuraError;
use actix_web::HttpRequest;
use eventura_infra::EventuraContext;

pub const API_KEY_HEADER: &str = "eventura-api-key";

/// Only callers that know the configured api key may trigger jobs and use
/// the routes below `/api/v1` that change state
pub fn protect_admin_route(req: &HttpRequest, ctx: &EventuraContext) -> Result<(), EventuraError> {
    let api_key = match req.headers().get(API_KEY_HEADER) {
        Some(api_key) => match api_key.to_str() {
            Ok(api_key) => api_key,
            Err(_) => {
                return Err(EventuraError::Unauthorized(
                    "Malformed api key provided".to_string(),
                ))
            }
        },
        None => {
            return Err(EventuraError::Unauthorized(format!(
                "Unable to find api-key in {} header",
                API_KEY_HEADER
            )))
        }
    };

    if api_key != ctx.config.api_key {
        return Err(EventuraError::Unauthorized(format!(
            "Invalid api-key provided in {} header",
            API_KEY_HEADER
        )));
    }
    Ok(())
}
