//! Sistema de manejo de errores
//!
//! Este módulo define la taxonomía de errores de la aplicación
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::route::RouteState;

/// Errores principales de la aplicación
///
/// Todos son recuperables a nivel de request: ninguno termina el proceso,
/// todos se traducen a una respuesta HTTP estructurada.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid transition: {from:?} -> {to:?}")]
    InvalidTransition { from: RouteState, to: RouteState },

    #[error("Capacity exceeded: cargo weighs {weight_kg} kg but vehicle capacity is {capacity_kg} kg")]
    CapacityExceeded { weight_kg: f64, capacity_kg: f64 },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
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
                        details: None,
                        code: "DB_ERROR".to_string(),
                    },
                )
            }

            AppError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: "The provided data is invalid".to_string(),
                    details: Some(json!(e)),
                    code: "VALIDATION_ERROR".to_string(),
                },
            ),

            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    error: "Unauthorized".to_string(),
                    message: msg,
                    details: None,
                    code: "UNAUTHORIZED".to_string(),
                },
            ),

            AppError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                ErrorResponse {
                    error: "Forbidden".to_string(),
                    message: msg,
                    details: None,
                    code: "FORBIDDEN".to_string(),
                },
            ),

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: msg,
                    details: None,
                    code: "NOT_FOUND".to_string(),
                },
            ),

            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    error: "Conflict".to_string(),
                    message: msg,
                    details: None,
                    code: "CONFLICT".to_string(),
                },
            ),

            AppError::InvalidState(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid State".to_string(),
                    message: msg,
                    details: None,
                    code: "INVALID_STATE".to_string(),
                },
            ),

            AppError::InvalidTransition { from, to } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid Transition".to_string(),
                    message: format!(
                        "Route transition {} -> {} is not permitted",
                        from.as_str(),
                        to.as_str()
                    ),
                    details: Some(json!({ "from": from.as_str(), "to": to.as_str() })),
                    code: "INVALID_TRANSITION".to_string(),
                },
            ),

            AppError::CapacityExceeded {
                weight_kg,
                capacity_kg,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Capacity Exceeded".to_string(),
                    message: format!(
                        "Cargo weighs {} kg but vehicle capacity is {} kg",
                        weight_kg, capacity_kg
                    ),
                    details: Some(json!({ "weight_kg": weight_kg, "capacity_kg": capacity_kg })),
                    code: "CAPACITY_EXCEEDED".to_string(),
                },
            ),

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: msg,
                    details: None,
                    code: "BAD_REQUEST".to_string(),
                },
            ),

            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: None,
                        code: "INTERNAL_ERROR".to_string(),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Helper para errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Helper para errores de conflicto por unicidad
pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} with {} '{}' already exists", resource, field, value))
}
