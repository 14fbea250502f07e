//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle tal como se persiste en la tabla `vehicles`,
//! junto con los atributos de creación y el filtro usado por la búsqueda de flota.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub capacity_kg: Decimal,
    pub tyres: i32,
    pub route: Vec<String>,
    /// Flag administrativo, independiente de las reservas
    pub available: bool,
    pub vehicle_no: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Construir un vehículo nuevo con id y timestamps asignados por el servidor
    pub fn from_new(new: NewVehicle) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            capacity_kg: new.capacity_kg,
            tyres: new.tyres,
            route: new.route,
            available: new.available,
            vehicle_no: new.vehicle_no,
            created_at: now,
            updated_at: now,
        }
    }

    /// Verificar si la ruta cubre ambos códigos (pertenencia, sin orden)
    pub fn serves(&self, origin: &str, destination: &str) -> bool {
        self.route.iter().any(|code| code == origin) && self.route.iter().any(|code| code == destination)
    }
}

/// Atributos para crear un vehículo
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub name: String,
    pub capacity_kg: Decimal,
    pub tyres: i32,
    pub route: Vec<String>,
    pub available: bool,
    pub vehicle_no: String,
}

/// Filtro de candidatos para la búsqueda de flota
#[derive(Debug, Clone)]
pub struct VehicleFilter {
    pub min_capacity_kg: Decimal,
    pub origin: String,
    pub destination: String,
}

impl VehicleFilter {
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        vehicle.capacity_kg >= self.min_capacity_kg && vehicle.serves(&self.origin, &self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truck(capacity: i64, route: &[&str]) -> Vehicle {
        Vehicle::from_new(NewVehicle {
            name: "Tata Ace".to_string(),
            capacity_kg: Decimal::from(capacity),
            tyres: 4,
            route: route.iter().map(|c| c.to_string()).collect(),
            available: true,
            vehicle_no: "MH01AB1234".to_string(),
        })
    }

    #[test]
    fn test_route_membership_ignores_order() {
        let vehicle = truck(1000, &["400010", "400001"]);
        assert!(vehicle.serves("400001", "400010"));
        assert!(vehicle.serves("400010", "400001"));
        assert!(!vehicle.serves("400001", "400099"));
    }

    #[test]
    fn test_filter_requires_capacity_and_route() {
        let filter = VehicleFilter {
            min_capacity_kg: Decimal::from(500),
            origin: "400001".to_string(),
            destination: "400010".to_string(),
        };

        assert!(filter.matches(&truck(500, &["400001", "400010"])));
        assert!(!filter.matches(&truck(499, &["400001", "400010"])));
        assert!(!filter.matches(&truck(2000, &["400001"])));
    }
}
