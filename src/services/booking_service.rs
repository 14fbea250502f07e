//! Servicio de reservas
//!
//! Orquesta la creación de reservas: duración estimada, ventana, existencia del vehículo,
//! disponibilidad e inserción. La inserción está protegida por la regla de exclusión
//! del store, así que dos reservas concurrentes sobre la misma ventana nunca ganan ambas.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::{Booking, BookingWindow, NewBooking};
use crate::repositories::{BookingStore, StoreError, VehicleStore};
use crate::services::availability_service::is_available;
use crate::services::duration_service::estimate_ride_duration;
use crate::utils::errors::FleetError;
use crate::utils::validation::parse_booking_id;

/// Datos de una reserva tal como llegan del handler
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub vehicle_id: String,
    pub customer_id: String,
    pub from_pincode: String,
    pub to_pincode: String,
    pub start_time: String,
}

#[derive(Clone)]
pub struct BookingService {
    vehicles: Arc<dyn VehicleStore>,
    bookings: Arc<dyn BookingStore>,
}

impl BookingService {
    pub fn new(vehicles: Arc<dyn VehicleStore>, bookings: Arc<dyn BookingStore>) -> Self {
        Self { vehicles, bookings }
    }

    /// Crear una reserva
    pub async fn create_booking(&self, request: BookingRequest) -> Result<Booking, FleetError> {
        let duration = estimate_ride_duration(&request.from_pincode, &request.to_pincode)?;
        let window = BookingWindow::derive(&request.start_time, duration)?;

        // Un id mal formado nunca puede nombrar un vehículo guardado
        let vehicle_id = Uuid::parse_str(request.vehicle_id.trim())
            .map_err(|_| FleetError::VehicleNotFound(request.vehicle_id.clone()))?;

        self.vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| FleetError::VehicleNotFound(request.vehicle_id.clone()))?;

        // Chequeo optimista; la decisión final la toma la inserción
        if !is_available(vehicle_id, &window, self.bookings.as_ref()).await? {
            tracing::warn!("🚫 Vehículo {} ya reservado entre {} y {}", vehicle_id, window.start, window.end);
            return Err(FleetError::BookingConflict);
        }

        let new_booking = NewBooking {
            vehicle_id,
            customer_id: request.customer_id,
            from_pincode: request.from_pincode,
            to_pincode: request.to_pincode,
            window,
        };

        match self.bookings.create(new_booking).await {
            Ok(booking) => {
                tracing::info!(
                    "✅ Reserva {} creada: vehículo {}, {} → {} ({}h)",
                    booking.id,
                    booking.vehicle_id,
                    booking.start_time,
                    booking.end_time,
                    duration
                );
                Ok(booking)
            }
            Err(StoreError::Overlap) => {
                tracing::warn!("⚠️ Carrera perdida al reservar el vehículo {}", vehicle_id);
                Err(FleetError::BookingConflict)
            }
            Err(e) => Err(FleetError::StorageFailure(e)),
        }
    }

    /// Eliminar una reserva por id
    pub async fn delete_booking(&self, id: &str) -> Result<Booking, FleetError> {
        let booking_id = parse_booking_id(id)?;

        let booking = self
            .bookings
            .find_by_id_and_delete(booking_id)
            .await?
            .ok_or_else(|| FleetError::BookingNotFound(id.to_string()))?;

        tracing::info!("🗑️ Reserva {} eliminada", booking.id);
        Ok(booking)
    }

    /// Listar todas las reservas
    pub async fn list_bookings(&self) -> Result<Vec<Booking>, FleetError> {
        Ok(self.bookings.find_all().await?)
    }
}
