use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreError, StoreResult, VehicleStore, UNIQUE_VIOLATION};
use crate::models::{NewVehicle, Vehicle, VehicleFilter};

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(e: sqlx::Error) -> StoreError {
    let is_unique_violation = e
        .as_database_error()
        .and_then(|db| db.code())
        .map_or(false, |code| code == UNIQUE_VIOLATION);

    if is_unique_violation {
        StoreError::Duplicate("vehicleNo".to_string())
    } else {
        log::error!("❌ Error creating vehicle: {}", e);
        StoreError::Database(e)
    }
}

#[async_trait]
impl VehicleStore for PgVehicleRepository {
    async fn create(&self, new: NewVehicle) -> StoreResult<Vehicle> {
        let vehicle = Vehicle::from_new(new);

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, name, capacity_kg, tyres, route, available, vehicle_no, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.name)
        .bind(vehicle.capacity_kg)
        .bind(vehicle.tyres)
        .bind(&vehicle.route)
        .bind(vehicle.available)
        .bind(&vehicle.vehicle_no)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(vehicle)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn find_all(&self) -> StoreResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    async fn find(&self, filter: &VehicleFilter) -> StoreResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE capacity_kg >= $1 AND route @> ARRAY[$2, $3]::TEXT[]
            ORDER BY created_at, id
            "#,
        )
        .bind(filter.min_capacity_kg)
        .bind(&filter.origin)
        .bind(&filter.destination)
        .fetch_all(&self.pool)
        .await?;

        log::debug!("🔍 {} vehículos cumplen capacidad y ruta", vehicles.len());
        Ok(vehicles)
    }

    async fn set_availability(&self, id: Uuid, available: bool) -> StoreResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET available = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(available)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::pg_error;

    #[test]
    fn test_unique_violation_is_duplicate_vehicle_no() {
        match map_insert_error(pg_error(UNIQUE_VIOLATION)) {
            StoreError::Duplicate(field) => assert_eq!(field, "vehicleNo"),
            other => panic!("expected Duplicate, got {:?}", other),
        }
    }

    #[test]
    fn test_exclusion_violation_is_not_a_duplicate() {
        assert!(matches!(map_insert_error(pg_error("23P01")), StoreError::Database(_)));
    }
}
