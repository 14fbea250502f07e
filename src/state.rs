//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los stores se inyectan aquí; nada de la
//! lógica de reservas accede a una conexión global.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    BookingStore, InMemoryBookingStore, InMemoryVehicleStore, PgBookingRepository, PgVehicleRepository,
    VehicleStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub vehicles: Arc<dyn VehicleStore>,
    pub bookings: Arc<dyn BookingStore>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, vehicles: Arc<dyn VehicleStore>, bookings: Arc<dyn BookingStore>) -> Self {
        Self {
            config,
            vehicles,
            bookings,
        }
    }

    /// Estado respaldado por PostgreSQL
    pub fn with_postgres(config: EnvironmentConfig, pool: PgPool) -> Self {
        Self::new(
            config,
            Arc::new(PgVehicleRepository::new(pool.clone())),
            Arc::new(PgBookingRepository::new(pool)),
        )
    }

    /// Estado en memoria (tests y desarrollo local sin base de datos)
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryVehicleStore::new()),
            Arc::new(InMemoryBookingStore::new()),
        )
    }
}
