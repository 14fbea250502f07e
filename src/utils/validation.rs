//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos de entrada (códigos postales, instantes, ids).

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;
use validator::ValidationError;

use crate::utils::errors::FleetError;

lazy_static! {
    /// Código de zona tipo pincode: sólo dígitos, cabe en un i64
    static ref LOCATION_CODE_REGEX: Regex = Regex::new(r"^[0-9]{1,18}$").unwrap();
}

/// Formatos naive aceptados (p.ej. inputs `datetime-local` del dashboard), interpretados en UTC
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Convertir un código de zona a entero
pub fn parse_location_code(value: &str) -> Result<i64, FleetError> {
    let trimmed = value.trim();
    if !LOCATION_CODE_REGEX.is_match(trimmed) {
        return Err(FleetError::InvalidLocationCode(value.to_string()));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| FleetError::InvalidLocationCode(value.to_string()))
}

/// Convertir el instante de inicio de una reserva (RFC3339 o naive en UTC)
pub fn parse_start_time(value: &str) -> Result<DateTime<Utc>, FleetError> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| FleetError::InvalidStartTime(value.to_string()))
}

/// Convertir el id de una reserva; se valida antes de tocar el store
pub fn parse_booking_id(value: &str) -> Result<Uuid, FleetError> {
    Uuid::parse_str(value.trim()).map_err(|_| FleetError::InvalidBookingId(value.to_string()))
}

/// Convertir la capacidad requerida de la búsqueda (no negativa)
pub fn parse_capacity(value: &str) -> Result<Decimal, FleetError> {
    Decimal::from_str(value.trim())
        .ok()
        .filter(|capacity| validate_non_negative(*capacity).is_ok())
        .ok_or_else(|| FleetError::InvalidCapacity(value.to_string()))
}

/// Tratar strings vacíos como ausentes
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de código de zona
pub fn validate_location_code(value: &str) -> Result<(), ValidationError> {
    if !LOCATION_CODE_REGEX.is_match(value.trim()) {
        let mut error = ValidationError::new("location_code");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"1-18 digits".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar una ruta: al menos un código y todos numéricos
pub fn validate_route(route: &Vec<String>) -> Result<(), ValidationError> {
    if route.is_empty() {
        return Err(ValidationError::new("route_empty"));
    }
    route.iter().try_for_each(|code| validate_location_code(code))
}

/// Validar capacidad en kg
pub fn validate_capacity(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(*value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_location_code() {
        assert_eq!(parse_location_code("400001").unwrap(), 400001);
        assert_eq!(parse_location_code(" 110001 ").unwrap(), 110001);
        assert!(matches!(
            parse_location_code("40A001"),
            Err(FleetError::InvalidLocationCode(_))
        ));
        assert!(parse_location_code("").is_err());
        assert!(parse_location_code("-400001").is_err());
    }

    #[test]
    fn test_parse_start_time_formats() {
        let expected = Utc.with_ymd_and_hms(2023, 10, 27, 10, 0, 0).unwrap();
        assert_eq!(parse_start_time("2023-10-27T10:00:00Z").unwrap(), expected);
        assert_eq!(parse_start_time("2023-10-27T15:30:00+05:30").unwrap(), expected);
        assert_eq!(parse_start_time("2023-10-27T10:00").unwrap(), expected);
        assert!(matches!(
            parse_start_time("27/10/2023"),
            Err(FleetError::InvalidStartTime(_))
        ));
    }

    #[test]
    fn test_parse_booking_id() {
        assert!(parse_booking_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(matches!(
            parse_booking_id("not-a-valid-id"),
            Err(FleetError::InvalidBookingId(_))
        ));
    }

    #[test]
    fn test_parse_capacity() {
        assert_eq!(parse_capacity("1500").unwrap(), Decimal::from(1500));
        assert_eq!(parse_capacity("12.5").unwrap(), Decimal::new(125, 1));
        assert!(matches!(parse_capacity("lots"), Err(FleetError::InvalidCapacity(_))));
        assert!(matches!(parse_capacity("-1"), Err(FleetError::InvalidCapacity(_))));
        assert_eq!(parse_capacity("0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("400001")), Some("400001"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_capacity(&Decimal::ZERO).is_ok());
        assert!(validate_capacity(&Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_validate_route() {
        assert!(validate_route(&vec!["400001".to_string(), "400010".to_string()]).is_ok());
        assert!(validate_route(&vec![]).is_err());
        assert!(validate_route(&vec!["400001".to_string(), "Mumbai".to_string()]).is_err());
    }
}
