use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::{validate_capacity, validate_route};

// Request para crear un vehículo; los campos ausentes se reportan juntos como 400
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(custom = "validate_capacity")]
    pub capacity_kg: Option<Decimal>,

    #[validate(range(min = 1))]
    pub tyres: Option<i32>,

    #[validate(custom = "validate_route")]
    pub route: Option<Vec<String>>,

    pub available: Option<bool>,

    #[validate(length(min = 1, max = 20))]
    pub vehicle_no: Option<String>,
}

impl CreateVehicleRequest {
    /// Campos obligatorios que faltan (o vienen vacíos)
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let blank = |value: &Option<String>| value.as_deref().map_or(true, |v| v.trim().is_empty());

        let mut missing = Vec::new();
        if blank(&self.name) {
            missing.push("name");
        }
        if self.capacity_kg.is_none() {
            missing.push("capacityKg");
        }
        if self.tyres.is_none() {
            missing.push("tyres");
        }
        if self.route.is_none() {
            missing.push("route");
        }
        if blank(&self.vehicle_no) {
            missing.push("vehicleNo");
        }
        missing
    }
}

// Request para cambiar el flag administrativo de disponibilidad
#[derive(Debug, Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub available: bool,
}

// Query de búsqueda de vehículos disponibles
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableVehiclesQuery {
    pub capacity_required: Option<String>,
    pub from_pincode: Option<String>,
    pub to_pincode: Option<String>,
    pub start_time: Option<String>,
}
