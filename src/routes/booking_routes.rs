use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};

use crate::controllers::booking_controller::BookingController;
use crate::dto::booking_dto::{CreateBookingRequest, DeleteBookingResponse};
use crate::models::Booking;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{ApiJson, ApiPath};

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/:id", delete(delete_booking))
}

async fn create_booking(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let controller = BookingController::new(&state);
    let booking = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, AppError> {
    let controller = BookingController::new(&state);
    Ok(Json(controller.list().await?))
}

// El id llega como String: un id mal formado es un 400 de la aplicación, no un rechazo del extractor
async fn delete_booking(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<DeleteBookingResponse>, AppError> {
    let controller = BookingController::new(&state);
    Ok(Json(controller.delete(&id).await?))
}
