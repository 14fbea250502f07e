//! Sistema de manejo de errores
//!
//! Este módulo define los errores de la lógica de reservas (`FleetError`),
//! los errores de la capa HTTP (`AppError`) y su conversión a respuestas HTTP.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::repositories::StoreError;

/// Errores de la lógica de disponibilidad y reservas
#[derive(Error, Debug)]
pub enum FleetError {
    #[error("Invalid location code: '{0}'")]
    InvalidLocationCode(String),

    #[error("Invalid start time: '{0}'")]
    InvalidStartTime(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid capacity: '{0}'")]
    InvalidCapacity(String),

    #[error("Invalid booking ID")]
    InvalidBookingId(String),

    #[error("Vehicle not found")]
    VehicleNotFound(String),

    #[error("Booking not found")]
    BookingNotFound(String),

    #[error("Vehicle already booked")]
    BookingConflict,

    #[error("Storage failure: {0}")]
    StorageFailure(#[from] StoreError),
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<FleetError> for AppError {
    fn from(err: FleetError) -> Self {
        match err {
            FleetError::InvalidLocationCode(_)
            | FleetError::InvalidStartTime(_)
            | FleetError::MissingParameter(_)
            | FleetError::InvalidCapacity(_)
            | FleetError::InvalidBookingId(_) => AppError::BadRequest(err.to_string()),
            FleetError::VehicleNotFound(_) | FleetError::BookingNotFound(_) => AppError::NotFound(err.to_string()),
            FleetError::BookingConflict => AppError::Conflict(err.to_string()),
            FleetError::StorageFailure(store) => AppError::from(store),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(e) => AppError::Database(e),
            StoreError::Duplicate(field) => conflict_error("Vehicle", &field),
            StoreError::Overlap => AppError::Conflict("Vehicle already booked".to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: Some(json!({ "sql_error": e.to_string() })),
                        code: Some("DB_ERROR".to_string()),
                    },
                )
            }

            AppError::Validation(e) => {
                tracing::warn!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                tracing::warn!("Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Conflict".to_string(),
                        message: msg,
                        details: None,
                        code: Some("CONFLICT".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message: msg,
                        details: None,
                        code: Some("BAD_REQUEST".to_string()),
                    },
                )
            }

            AppError::Timeout => {
                tracing::warn!("Request timed out");
                (
                    StatusCode::REQUEST_TIMEOUT,
                    ErrorResponse {
                        error: "Request Timeout".to_string(),
                        message: "The request took too long to complete".to_string(),
                        details: None,
                        code: Some("TIMEOUT".to_string()),
                    },
                )
            }

            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de conflicto
pub fn conflict_error(resource: &str, field: &str) -> AppError {
    AppError::Conflict(format!("{} with this {} already exists", resource, field))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fleet_errors_map_to_http_status() {
        let cases = [
            (FleetError::InvalidLocationCode("abc".into()), StatusCode::BAD_REQUEST),
            (FleetError::InvalidStartTime("ayer".into()), StatusCode::BAD_REQUEST),
            (FleetError::MissingParameter("startTime".into()), StatusCode::BAD_REQUEST),
            (FleetError::InvalidBookingId("x".into()), StatusCode::BAD_REQUEST),
            (FleetError::VehicleNotFound("v1".into()), StatusCode::NOT_FOUND),
            (FleetError::BookingNotFound("b1".into()), StatusCode::NOT_FOUND),
            (FleetError::BookingConflict, StatusCode::CONFLICT),
            (
                FleetError::StorageFailure(StoreError::Database(sqlx::Error::PoolTimedOut)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_duplicate_vehicle_is_conflict() {
        let response = AppError::from(StoreError::Duplicate("vehicleNo".into())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
