//! Modelo de Booking
//!
//! Una reserva referencia un único vehículo por id (sin ownership) y ocupa
//! la ventana semiabierta [start_time, end_time).

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::FleetError;
use crate::utils::validation::parse_start_time;

/// Booking principal - mapea exactamente a la tabla bookings
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub customer_id: String,
    pub from_pincode: String,
    pub to_pincode: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn from_new(new: NewBooking) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            vehicle_id: new.vehicle_id,
            customer_id: new.customer_id,
            from_pincode: new.from_pincode,
            to_pincode: new.to_pincode,
            start_time: new.window.start,
            end_time: new.window.end,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn window(&self) -> BookingWindow {
        BookingWindow {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

/// Atributos para persistir una reserva
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub vehicle_id: Uuid,
    pub customer_id: String,
    pub from_pincode: String,
    pub to_pincode: String,
    pub window: BookingWindow,
}

/// Ventana semiabierta [start, end) en la que un vehículo está comprometido
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BookingWindow {
    /// Ventana que empieza en `start` y dura `duration_hours` horas.
    /// Falla si el fin cae fuera del rango representable.
    pub fn new(start: DateTime<Utc>, duration_hours: u32) -> Result<Self, FleetError> {
        let end = start
            .checked_add_signed(Duration::hours(i64::from(duration_hours)))
            .ok_or_else(|| FleetError::InvalidStartTime(start.to_rfc3339()))?;
        Ok(Self { start, end })
    }

    /// Derivar la ventana a partir del instante de inicio tal como llega en la request
    pub fn derive(start_time: &str, duration_hours: u32) -> Result<Self, FleetError> {
        let start = parse_start_time(start_time)?;
        Self::new(start, duration_hours).map_err(|_| FleetError::InvalidStartTime(start_time.to_string()))
    }

    /// Una ventana de 0 horas no contiene ningún instante
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Solapamiento de intervalos semiabiertos: a0 < b1 && b0 < a1.
    /// Las ventanas vacías nunca solapan.
    pub fn overlaps(&self, other: &BookingWindow) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 10, 27, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_window_end_is_start_plus_hours() {
        let window = BookingWindow::derive("2023-10-27T10:00:00Z", 9).unwrap();
        assert_eq!(window.start, at(10));
        assert_eq!(window.end, at(19));
    }

    #[test]
    fn test_derive_rejects_invalid_start_time() {
        let err = BookingWindow::derive("mañana a las diez", 3).unwrap_err();
        assert!(matches!(err, FleetError::InvalidStartTime(_)));
    }

    #[test]
    fn test_window_end_past_calendar_limit_is_rejected() {
        let err = BookingWindow::derive("+262142-12-31T23:00", 9).unwrap_err();
        assert!(matches!(err, FleetError::InvalidStartTime(ref raw) if raw == "+262142-12-31T23:00"));

        let window = BookingWindow::derive("+262142-12-31T14:00", 9).unwrap();
        assert_eq!(window.end - window.start, Duration::hours(9));
    }

    #[test]
    fn test_zero_duration_window_is_empty() {
        let window = BookingWindow::new(at(10), 0).unwrap();
        assert!(window.is_empty());
        assert_eq!(window.start, window.end);
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let windows = [
            BookingWindow::new(at(0), 9).unwrap(),
            BookingWindow::new(at(5), 2).unwrap(),
            BookingWindow::new(at(9), 3).unwrap(),
            BookingWindow::new(at(12), 0).unwrap(),
            BookingWindow::new(at(8), 10).unwrap(),
        ];

        for a in &windows {
            for b in &windows {
                assert_eq!(a.overlaps(b), b.overlaps(a), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_adjacent_windows_do_not_overlap() {
        let morning = BookingWindow::new(at(0), 9).unwrap();
        let afternoon = BookingWindow::new(at(9), 3).unwrap();
        assert!(!morning.overlaps(&afternoon));
        assert!(morning.overlaps(&BookingWindow::new(at(8), 2).unwrap()));
    }

    #[test]
    fn test_empty_window_inside_booking_does_not_overlap() {
        let booked = BookingWindow::new(at(0), 9).unwrap();
        let instant = BookingWindow::new(at(4), 0).unwrap();
        assert!(!booked.overlaps(&instant));
        assert!(!instant.overlaps(&booked));
    }
}
