use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{BookingStore, StoreError, StoreResult, EXCLUSION_VIOLATION};
use crate::models::{Booking, BookingWindow, NewBooking};

/// Reservas en PostgreSQL. La restricción `bookings_no_overlap` (EXCLUDE USING gist)
/// es la que garantiza que dos inserciones concurrentes no reserven la misma ventana.
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(e: sqlx::Error) -> StoreError {
    let is_exclusion_violation = e
        .as_database_error()
        .and_then(|db| db.code())
        .map_or(false, |code| code == EXCLUSION_VIOLATION);

    if is_exclusion_violation {
        StoreError::Overlap
    } else {
        log::error!("❌ Error creating booking: {}", e);
        StoreError::Database(e)
    }
}

#[async_trait]
impl BookingStore for PgBookingRepository {
    async fn find_overlapping(&self, vehicle_id: Uuid, window: &BookingWindow) -> StoreResult<Option<Booking>> {
        // Mismo criterio que BookingWindow::overlaps: ventanas vacías excluidas
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE vehicle_id = $1
              AND $2 < $3
              AND start_time < end_time
              AND start_time < $3
              AND end_time > $2
            ORDER BY start_time
            LIMIT 1
            "#,
        )
        .bind(vehicle_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn find_all(&self) -> StoreResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;

        Ok(bookings)
    }

    async fn create(&self, new: NewBooking) -> StoreResult<Booking> {
        let booking = Booking::from_new(new);

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (id, vehicle_id, customer_id, from_pincode, to_pincode, start_time, end_time, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(booking.id)
        .bind(booking.vehicle_id)
        .bind(&booking.customer_id)
        .bind(&booking.from_pincode)
        .bind(&booking.to_pincode)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(booking)
    }

    async fn find_by_id_and_delete(&self, id: Uuid) -> StoreResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>("DELETE FROM bookings WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::pg_error;

    #[test]
    fn test_exclusion_violation_is_overlap() {
        assert!(matches!(map_insert_error(pg_error(EXCLUSION_VIOLATION)), StoreError::Overlap));
    }

    #[test]
    fn test_other_errors_stay_database_errors() {
        assert!(matches!(map_insert_error(pg_error("23503")), StoreError::Database(_)));
        assert!(matches!(map_insert_error(sqlx::Error::PoolTimedOut), StoreError::Database(_)));
    }
}
