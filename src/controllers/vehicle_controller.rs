use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{AvailableVehiclesQuery, CreateVehicleRequest};
use crate::models::{NewVehicle, Vehicle};
use crate::repositories::VehicleStore;
use crate::services::{AvailableVehicle, FleetSearchCriteria, FleetSearchService};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError, AppResult};
use crate::utils::validation::{non_blank, parse_capacity};

pub struct VehicleController {
    repository: Arc<dyn VehicleStore>,
    search: FleetSearchService,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.vehicles.clone(),
            search: FleetSearchService::new(state.vehicles.clone(), state.bookings.clone()),
        }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(bad_request_error(&format!("Missing fields: {}", missing.join(", "))));
        }
        request.validate()?;

        let (Some(name), Some(capacity_kg), Some(tyres), Some(route), Some(vehicle_no)) = (
            request.name,
            request.capacity_kg,
            request.tyres,
            request.route,
            request.vehicle_no,
        ) else {
            return Err(bad_request_error("Missing fields"));
        };

        let new_vehicle = NewVehicle {
            name: name.trim().to_string(),
            capacity_kg,
            tyres,
            route: route.iter().map(|code| code.trim().to_string()).collect(),
            available: request.available.unwrap_or(true),
            vehicle_no: vehicle_no.trim().to_string(),
        };

        let vehicle = self.repository.create(new_vehicle).await?;
        tracing::info!("🚛 Vehículo {} ({}) registrado", vehicle.vehicle_no, vehicle.id);
        Ok(vehicle)
    }

    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Vehicle> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))
    }

    pub async fn set_availability(&self, id: Uuid, available: bool) -> AppResult<Vehicle> {
        let vehicle = self
            .repository
            .set_availability(id, available)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        tracing::info!("🔧 Vehículo {} marcado como available={}", vehicle.id, available);
        Ok(vehicle)
    }

    pub async fn find_available(&self, query: AvailableVehiclesQuery) -> AppResult<Vec<AvailableVehicle>> {
        let capacity_required = non_blank(query.capacity_required.as_deref())
            .map(parse_capacity)
            .transpose()?;

        let criteria = FleetSearchCriteria {
            capacity_required,
            from_pincode: non_blank(query.from_pincode.as_deref()).map(str::to_string),
            to_pincode: non_blank(query.to_pincode.as_deref()).map(str::to_string),
            start_time: non_blank(query.start_time.as_deref()).map(str::to_string),
        };

        Ok(self.search.find_available(criteria).await?)
    }
}
