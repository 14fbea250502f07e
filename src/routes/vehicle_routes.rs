use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{AvailableVehiclesQuery, CreateVehicleRequest, UpdateAvailabilityRequest};
use crate::models::Vehicle;
use crate::services::AvailableVehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{ApiJson, ApiPath, ApiQuery};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        // Antes que "/:id" para que "available" no se trate como id
        .route("/available", get(available_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id/availability", patch(update_availability))
}

async fn create_vehicle(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let controller = VehicleController::new(&state);
    let vehicle = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.list().await?))
}

async fn available_vehicles(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AvailableVehiclesQuery>,
) -> Result<Json<Vec<AvailableVehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.find_available(query).await?))
}

async fn get_vehicle(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_availability(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateAvailabilityRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.set_availability(id, request.available).await?))
}
