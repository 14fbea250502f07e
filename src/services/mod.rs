//! Services module
//!
//! Este módulo contiene la lógica de negocio: estimación de duración, disponibilidad
//! de vehículos, creación/borrado de reservas y búsqueda de flota.

pub mod availability_service;
pub mod booking_service;
pub mod duration_service;
pub mod fleet_search_service;

pub use availability_service::is_available;
pub use booking_service::{BookingRequest, BookingService};
pub use duration_service::estimate_ride_duration;
pub use fleet_search_service::{AvailableVehicle, FleetSearchCriteria, FleetSearchService};
