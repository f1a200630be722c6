use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse, Result};
use log::warn;

use crate::errors::ApiError;
use crate::routes::pool::configure_pool_routes;

/// Health check endpoint
async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"})))
}

/// Report malformed JSON bodies with the same envelope as every other error
fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected JSON body for {}: {}", req.path(), err);
    ApiError::BadRequest(err.to_string()).into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health_check))
                .configure(configure_pool_routes),
        );
}
