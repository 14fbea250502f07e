//! Rutas HTTP
//!
//! Arma el router completo de la API con sus capas (CORS, compresión, trazas y timeout).

pub mod booking_routes;
pub mod vehicle_routes;

use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, response::Json, routing::get, BoxError, Router};
use serde_json::json;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::cors_for;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Router de la API con el estado ya inyectado
pub fn create_app(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let cors = cors_for(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/bookings", booking_routes::create_booking_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(timeout)),
        )
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Health check simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "fleetlink",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::Timeout
    } else {
        AppError::Internal(err.to_string())
    }
}
