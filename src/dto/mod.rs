pub mod booking_dto;
pub mod vehicle_dto;
