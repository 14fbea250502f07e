//! Búsqueda de vehículos disponibles
//!
//! Filtra el catálogo por capacidad y ruta y se queda con los vehículos libres
//! para la ventana derivada del viaje solicitado.

use std::sync::Arc;

use futures::future::try_join_all;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BookingWindow, Vehicle, VehicleFilter};
use crate::repositories::{BookingStore, VehicleStore};
use crate::services::availability_service::is_available;
use crate::services::duration_service::estimate_ride_duration;
use crate::utils::errors::FleetError;

/// Parámetros de búsqueda; todos obligatorios
#[derive(Debug, Clone, Default)]
pub struct FleetSearchCriteria {
    pub capacity_required: Option<Decimal>,
    pub from_pincode: Option<String>,
    pub to_pincode: Option<String>,
    pub start_time: Option<String>,
}

impl FleetSearchCriteria {
    /// Nombres (tal como van en la query) de los parámetros ausentes
    fn missing(&self) -> Vec<&'static str> {
        [
            ("capacityRequired", self.capacity_required.is_none()),
            ("fromPincode", self.from_pincode.is_none()),
            ("toPincode", self.to_pincode.is_none()),
            ("startTime", self.start_time.is_none()),
        ]
        .into_iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| name)
        .collect()
    }
}

/// Vehículo disponible anotado con la duración estimada del viaje
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableVehicle {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub estimated_ride_duration_hours: u32,
}

#[derive(Clone)]
pub struct FleetSearchService {
    vehicles: Arc<dyn VehicleStore>,
    bookings: Arc<dyn BookingStore>,
}

impl FleetSearchService {
    pub fn new(vehicles: Arc<dyn VehicleStore>, bookings: Arc<dyn BookingStore>) -> Self {
        Self { vehicles, bookings }
    }

    /// Vehículos con capacidad y ruta suficientes que están libres en la ventana.
    /// Conserva el orden del repositorio.
    pub async fn find_available(&self, criteria: FleetSearchCriteria) -> Result<Vec<AvailableVehicle>, FleetError> {
        let (capacity_required, from_pincode, to_pincode, start_time) = match criteria {
            FleetSearchCriteria {
                capacity_required: Some(capacity),
                from_pincode: Some(from),
                to_pincode: Some(to),
                start_time: Some(start),
            } => (capacity, from, to, start),
            criteria => return Err(FleetError::MissingParameter(criteria.missing().join(", "))),
        };

        // La duración sólo depende de los dos códigos: se calcula una vez
        let duration = estimate_ride_duration(&from_pincode, &to_pincode)?;
        let window = BookingWindow::derive(&start_time, duration)?;

        let filter = VehicleFilter {
            min_capacity_kg: capacity_required,
            origin: from_pincode.trim().to_string(),
            destination: to_pincode.trim().to_string(),
        };
        let candidates = self.vehicles.find(&filter).await?;
        tracing::debug!(
            "🔍 {} candidatos para {} → {} (≥ {} kg)",
            candidates.len(),
            filter.origin,
            filter.destination,
            filter.min_capacity_kg
        );

        let checks = candidates
            .iter()
            .map(|vehicle| is_available(vehicle.id, &window, self.bookings.as_ref()));
        let availability = try_join_all(checks).await?;

        let available: Vec<AvailableVehicle> = candidates
            .into_iter()
            .zip(availability)
            .filter(|(_, free)| *free)
            .map(|(vehicle, _)| AvailableVehicle {
                vehicle,
                estimated_ride_duration_hours: duration,
            })
            .collect();

        tracing::info!("🚚 {} vehículos disponibles desde {}", available.len(), window.start);
        Ok(available)
    }
}
