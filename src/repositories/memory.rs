//! Stores en memoria
//!
//! Implementan los mismos contratos que los repositorios PostgreSQL. Se usan en los tests
//! y con `STORAGE_BACKEND=memory` para levantar la API sin base de datos.
//! Ningún lock se mantiene a través de un `.await`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{BookingStore, StoreError, StoreResult, VehicleStore};
use crate::models::{Booking, BookingWindow, NewBooking, NewVehicle, Vehicle, VehicleFilter};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Default)]
pub struct InMemoryVehicleStore {
    // Vec para conservar el orden de creación
    vehicles: Mutex<Vec<Vehicle>>,
}

impl InMemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleStore for InMemoryVehicleStore {
    async fn create(&self, new: NewVehicle) -> StoreResult<Vehicle> {
        let mut vehicles = lock(&self.vehicles);
        if vehicles.iter().any(|v| v.vehicle_no == new.vehicle_no) {
            return Err(StoreError::Duplicate("vehicleNo".to_string()));
        }

        let vehicle = Vehicle::from_new(new);
        vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Vehicle>> {
        Ok(lock(&self.vehicles).iter().find(|v| v.id == id).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<Vehicle>> {
        Ok(lock(&self.vehicles).clone())
    }

    async fn find(&self, filter: &VehicleFilter) -> StoreResult<Vec<Vehicle>> {
        Ok(lock(&self.vehicles)
            .iter()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect())
    }

    async fn set_availability(&self, id: Uuid, available: bool) -> StoreResult<Option<Vehicle>> {
        let mut vehicles = lock(&self.vehicles);
        Ok(vehicles.iter_mut().find(|v| v.id == id).map(|vehicle| {
            vehicle.available = available;
            vehicle.updated_at = Utc::now();
            vehicle.clone()
        }))
    }
}

#[derive(Default)]
struct BookingTable {
    by_id: HashMap<Uuid, Booking>,
    by_vehicle: HashMap<Uuid, Vec<Uuid>>,
    insertion_order: Vec<Uuid>,
}

impl BookingTable {
    fn overlapping(&self, vehicle_id: Uuid, window: &BookingWindow) -> Option<&Booking> {
        self.by_vehicle
            .get(&vehicle_id)?
            .iter()
            .filter_map(|id| self.by_id.get(id))
            .find(|booking| booking.window().overlaps(window))
    }
}

#[derive(Default)]
pub struct InMemoryBookingStore {
    table: Mutex<BookingTable>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn find_overlapping(&self, vehicle_id: Uuid, window: &BookingWindow) -> StoreResult<Option<Booking>> {
        Ok(lock(&self.table).overlapping(vehicle_id, window).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<Booking>> {
        let table = lock(&self.table);
        Ok(table
            .insertion_order
            .iter()
            .filter_map(|id| table.by_id.get(id).cloned())
            .collect())
    }

    async fn create(&self, new: NewBooking) -> StoreResult<Booking> {
        // Comprobación e inserción bajo el mismo lock: equivalente a la restricción EXCLUDE
        let mut table = lock(&self.table);
        if table.overlapping(new.vehicle_id, &new.window).is_some() {
            return Err(StoreError::Overlap);
        }

        let booking = Booking::from_new(new);
        table.by_vehicle.entry(booking.vehicle_id).or_default().push(booking.id);
        table.insertion_order.push(booking.id);
        table.by_id.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id_and_delete(&self, id: Uuid) -> StoreResult<Option<Booking>> {
        let mut table = lock(&self.table);
        let Some(booking) = table.by_id.remove(&id) else {
            return Ok(None);
        };

        if let Some(ids) = table.by_vehicle.get_mut(&booking.vehicle_id) {
            ids.retain(|other| *other != id);
        }
        table.insertion_order.retain(|other| *other != id);
        Ok(Some(booking))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn window(hour: u32, hours: u32) -> BookingWindow {
        BookingWindow::new(Utc.with_ymd_and_hms(2023, 10, 27, hour, 0, 0).unwrap(), hours).unwrap()
    }

    fn new_booking(vehicle_id: Uuid, window: BookingWindow) -> NewBooking {
        NewBooking {
            vehicle_id,
            customer_id: "c1".to_string(),
            from_pincode: "400001".to_string(),
            to_pincode: "400010".to_string(),
            window,
        }
    }

    fn new_vehicle(vehicle_no: &str) -> NewVehicle {
        NewVehicle {
            name: "Eicher Pro".to_string(),
            capacity_kg: Decimal::from(3000),
            tyres: 6,
            route: vec!["400001".to_string(), "400010".to_string()],
            available: true,
            vehicle_no: vehicle_no.to_string(),
        }
    }

    #[tokio::test]
    async fn test_vehicle_no_is_unique() {
        let store = InMemoryVehicleStore::new();
        store.create(new_vehicle("MH12XY0001")).await.unwrap();

        let err = store.create(new_vehicle("MH12XY0001")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_vehicles_keep_creation_order() {
        let store = InMemoryVehicleStore::new();
        let first = store.create(new_vehicle("A1")).await.unwrap();
        let second = store.create(new_vehicle("A2")).await.unwrap();

        let ids: Vec<Uuid> = store.find_all().await.unwrap().into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_set_availability_only_touches_flag() {
        let store = InMemoryVehicleStore::new();
        let vehicle = store.create(new_vehicle("A1")).await.unwrap();

        let updated = store.set_availability(vehicle.id, false).await.unwrap().unwrap();
        assert!(!updated.available);
        assert_eq!(updated.vehicle_no, vehicle.vehicle_no);
        assert!(store.set_availability(Uuid::new_v4(), false).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overlap_lookup_is_scoped_to_vehicle() {
        let store = InMemoryBookingStore::new();
        let truck_a = Uuid::new_v4();
        let truck_b = Uuid::new_v4();
        store.create(new_booking(truck_a, window(10, 9))).await.unwrap();

        assert!(store.find_overlapping(truck_a, &window(12, 1)).await.unwrap().is_some());
        assert!(store.find_overlapping(truck_b, &window(12, 1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_overlap() {
        let store = InMemoryBookingStore::new();
        let truck = Uuid::new_v4();
        store.create(new_booking(truck, window(10, 9))).await.unwrap();

        let err = store.create(new_booking(truck, window(18, 2))).await.unwrap_err();
        assert!(matches!(err, StoreError::Overlap));

        // Ventana contigua: permitida
        store.create(new_booking(truck, window(19, 2))).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_removes_from_listing() {
        let store = InMemoryBookingStore::new();
        let truck = Uuid::new_v4();
        let booking = store.create(new_booking(truck, window(10, 9))).await.unwrap();

        let deleted = store.find_by_id_and_delete(booking.id).await.unwrap();
        assert_eq!(deleted, Some(booking.clone()));
        assert!(store.find_all().await.unwrap().is_empty());
        assert!(store.find_overlapping(truck, &window(10, 9)).await.unwrap().is_none());
        assert!(store.find_by_id_and_delete(booking.id).await.unwrap().is_none());
    }
}
