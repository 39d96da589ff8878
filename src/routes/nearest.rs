use actix_web::{web, HttpResponse, Responder};
use tracing::Instrument;

use crate::core::Resolver;
use crate::models::{ErrorResponse, HealthResponse, NearestQuery};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
}

/// Configure the lookup and health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/nearest", web::get().to(find_nearest));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.resolver.storage_healthy().await { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Nearest airport endpoint
///
/// GET /api/v1/nearest?x={latitude}&y={longitude}
///
/// Every failure is answered with `{"err": "<message>"}`; callers tell
/// success from failure by the presence of `err`, not by status code.
async fn find_nearest(
    state: web::Data<AppState>,
    query: web::Query<NearestQuery>,
) -> impl Responder {
    let span = tracing::info_span!("find_nearest", request_id = %uuid::Uuid::new_v4());

    async move {
        let point = match query.point() {
            Ok(point) => point,
            Err(e) => {
                tracing::info!("Rejected query x={:?} y={:?}: {}", query.x, query.y, e);
                return HttpResponse::Ok().json(ErrorResponse::new(e.to_string()));
            }
        };

        match state.resolver.resolve(point).await {
            Ok(response) => HttpResponse::Ok().json(response),
            Err(e) => {
                tracing::warn!("Lookup failed for ({}, {}): {}", point.x, point.y, e);
                HttpResponse::Ok().json(ErrorResponse::new(e.to_string()))
            }
        }
    }
    .instrument(span)
    .await
}
