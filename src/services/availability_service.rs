//! Comprobación de disponibilidad de un vehículo para una ventana

use uuid::Uuid;

use crate::models::BookingWindow;
use crate::repositories::BookingStore;
use crate::utils::errors::FleetError;

/// Un vehículo está disponible si ninguna de sus reservas solapa la ventana.
/// Sólo lectura; siempre consulta el estado actual del store.
pub async fn is_available(
    vehicle_id: Uuid,
    window: &BookingWindow,
    bookings: &dyn BookingStore,
) -> Result<bool, FleetError> {
    let conflict = bookings.find_overlapping(vehicle_id, window).await?;
    if let Some(existing) = &conflict {
        tracing::debug!("🚫 Vehículo {} ocupado por la reserva {}", vehicle_id, existing.id);
    }
    Ok(conflict.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewBooking;
    use crate::repositories::InMemoryBookingStore;
    use chrono::{TimeZone, Utc};

    fn window(hour: u32, hours: u32) -> BookingWindow {
        BookingWindow::new(Utc.with_ymd_and_hms(2023, 10, 27, hour, 0, 0).unwrap(), hours).unwrap()
    }

    async fn store_with_booking(vehicle_id: Uuid, booked: BookingWindow) -> InMemoryBookingStore {
        let store = InMemoryBookingStore::new();
        store
            .create(NewBooking {
                vehicle_id,
                customer_id: "c1".to_string(),
                from_pincode: "400001".to_string(),
                to_pincode: "400010".to_string(),
                window: booked,
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_overlapping_window_is_unavailable() {
        let truck = Uuid::new_v4();
        let store = store_with_booking(truck, window(10, 9)).await;

        assert!(!is_available(truck, &window(10, 9), &store).await.unwrap());
        assert!(!is_available(truck, &window(18, 4), &store).await.unwrap());
    }

    #[tokio::test]
    async fn test_non_overlapping_window_is_available() {
        let truck = Uuid::new_v4();
        let store = store_with_booking(truck, window(10, 9)).await;

        assert!(is_available(truck, &window(19, 3), &store).await.unwrap());
        assert!(is_available(truck, &window(4, 6), &store).await.unwrap());
    }

    #[tokio::test]
    async fn test_zero_length_window_is_always_available() {
        let truck = Uuid::new_v4();
        let store = store_with_booking(truck, window(10, 9)).await;

        assert!(is_available(truck, &window(12, 0), &store).await.unwrap());
    }

    #[tokio::test]
    async fn test_other_vehicles_bookings_are_ignored() {
        let store = store_with_booking(Uuid::new_v4(), window(10, 9)).await;

        assert!(is_available(Uuid::new_v4(), &window(10, 9), &store).await.unwrap());
    }
}
