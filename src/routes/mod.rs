// Route exports
pub mod nearest;

use actix_web::{error, web, HttpRequest, HttpResponse};

use crate::models::ErrorResponse;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(query_config())
            .configure(nearest::configure),
    );
}

/// Query extraction that reports failures through the `{"err": ...}` body
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(handle_query_payload_error)
}

/// Malformed query strings get the same `{"err": ...}` body as lookup failures
fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    let body = HttpResponse::Ok().json(ErrorResponse::new(format!("Invalid query: {}", err)));
    error::InternalError::from_response(err, body).into()
}
