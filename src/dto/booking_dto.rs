use serde::{Deserialize, Serialize};

use crate::models::Booking;

// Request para crear una reserva
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub vehicle_id: Option<String>,
    pub customer_id: Option<String>,
    pub from_pincode: Option<String>,
    pub to_pincode: Option<String>,
    pub start_time: Option<String>,
}

// Response del borrado de una reserva
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBookingResponse {
    pub message: String,
    pub deleted_booking: Booking,
}
