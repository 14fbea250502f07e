use crate::dto::booking_dto::{CreateBookingRequest, DeleteBookingResponse};
use crate::models::Booking;
use crate::services::{BookingRequest, BookingService};
use crate::state::AppState;
use crate::utils::errors::{AppResult, FleetError};
use crate::utils::validation::non_blank;

pub struct BookingController {
    service: BookingService,
}

impl BookingController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: BookingService::new(state.vehicles.clone(), state.bookings.clone()),
        }
    }

    pub async fn create(&self, request: CreateBookingRequest) -> AppResult<Booking> {
        let field = |value: &Option<String>| non_blank(value.as_deref()).map(|v| v.trim().to_string());

        let booking_request = match (
            field(&request.vehicle_id),
            field(&request.customer_id),
            field(&request.from_pincode),
            field(&request.to_pincode),
            field(&request.start_time),
        ) {
            (Some(vehicle_id), Some(customer_id), Some(from_pincode), Some(to_pincode), Some(start_time)) => {
                BookingRequest {
                    vehicle_id,
                    customer_id,
                    from_pincode,
                    to_pincode,
                    start_time,
                }
            }
            _ => return Err(FleetError::MissingParameter(missing_fields(&request).join(", ")).into()),
        };

        Ok(self.service.create_booking(booking_request).await?)
    }

    pub async fn list(&self) -> AppResult<Vec<Booking>> {
        Ok(self.service.list_bookings().await?)
    }

    pub async fn delete(&self, id: &str) -> AppResult<DeleteBookingResponse> {
        let booking = self.service.delete_booking(id).await?;

        Ok(DeleteBookingResponse {
            message: "Booking deleted successfully".to_string(),
            deleted_booking: booking,
        })
    }
}

/// Campos obligatorios ausentes o vacíos en el body
fn missing_fields(request: &CreateBookingRequest) -> Vec<&'static str> {
    [
        ("vehicleId", &request.vehicle_id),
        ("customerId", &request.customer_id),
        ("fromPincode", &request.from_pincode),
        ("toPincode", &request.to_pincode),
        ("startTime", &request.start_time),
    ]
    .into_iter()
    .filter(|(_, value)| non_blank(value.as_deref()).is_none())
    .map(|(name, _)| name)
    .collect()
}
