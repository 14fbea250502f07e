//! Repositorios
//!
//! Contratos de acceso a vehículos y reservas. La lógica de reservas sólo conoce
//! estos traits; las implementaciones (PostgreSQL o memoria) se inyectan vía `AppState`.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Booking, BookingWindow, NewBooking, NewVehicle, Vehicle, VehicleFilter};

pub mod booking_repository;
pub mod memory;
pub mod vehicle_repository;

pub use booking_repository::PgBookingRepository;
pub use memory::{InMemoryBookingStore, InMemoryVehicleStore};
pub use vehicle_repository::PgVehicleRepository;

/// Código PostgreSQL de violación de unicidad
pub(crate) const UNIQUE_VIOLATION: &str = "23505";
/// Código PostgreSQL de violación de exclusión
pub(crate) const EXCLUSION_VIOLATION: &str = "23P01";

/// Errores de los stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// La inserción solaparía una reserva existente del mismo vehículo
    #[error("booking window overlaps an existing booking")]
    Overlap,

    #[error("duplicate value for unique field '{0}'")]
    Duplicate(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn create(&self, new: NewVehicle) -> StoreResult<Vehicle>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Vehicle>>;

    /// Todos los vehículos en orden de creación
    async fn find_all(&self) -> StoreResult<Vec<Vehicle>>;

    /// Vehículos que cumplen el filtro, en orden de creación
    async fn find(&self, filter: &VehicleFilter) -> StoreResult<Vec<Vehicle>>;

    async fn set_availability(&self, id: Uuid, available: bool) -> StoreResult<Option<Vehicle>>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Primera reserva del vehículo cuya ventana solapa `window`.
    /// La consulta nunca mira reservas de otros vehículos.
    async fn find_overlapping(&self, vehicle_id: Uuid, window: &BookingWindow) -> StoreResult<Option<Booking>>;

    /// Todas las reservas en orden de creación
    async fn find_all(&self) -> StoreResult<Vec<Booking>>;

    /// Insertar de forma atómica respecto al solapamiento: devuelve
    /// `StoreError::Overlap` si otra reserva del vehículo ya ocupa la ventana.
    async fn create(&self, new: NewBooking) -> StoreResult<Booking>;

    async fn find_by_id_and_delete(&self, id: Uuid) -> StoreResult<Option<Booking>>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::borrow::Cow;

    use sqlx::error::{DatabaseError, ErrorKind};

    /// Error de PostgreSQL con un SQLSTATE concreto, sin base de datos real
    #[derive(Debug, thiserror::Error)]
    #[error("{message}")]
    struct PgStateError {
        code: &'static str,
        message: String,
    }

    impl DatabaseError for PgStateError {
        fn message(&self) -> &str {
            &self.message
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.code {
                super::UNIQUE_VIOLATION => ErrorKind::UniqueViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    pub(crate) fn pg_error(code: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(PgStateError {
            code,
            message: format!("sqlstate {}", code),
        }))
    }
}
