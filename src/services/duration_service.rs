//! Estimación de duración de viaje
//!
//! La distancia entre pincodes es un proxy sintético: |destino - origen| mod 24 horas.

use crate::utils::errors::FleetError;
use crate::utils::validation::parse_location_code;

/// Horas máximas de un viaje + 1
const HOURS_PER_DAY: i64 = 24;

/// Estimar la duración en horas de un viaje entre dos códigos de zona.
/// Simétrica y acotada a [0, 23].
pub fn estimate_ride_duration(from_pincode: &str, to_pincode: &str) -> Result<u32, FleetError> {
    let from = parse_location_code(from_pincode)?;
    let to = parse_location_code(to_pincode)?;

    let hours = (to - from).abs() % HOURS_PER_DAY;
    // hours ∈ [0, 23]
    Ok(hours as u32)
}
