//! Modelos de datos
//!
//! Vehículos de la flota y reservas sobre ellos.

pub mod booking;
pub mod vehicle;

pub use booking::*;
pub use vehicle::*;
