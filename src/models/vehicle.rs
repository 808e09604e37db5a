//! Modelo de Vehicle
//!
//! Mapea a la tabla `vehicles`. El campo `status` es de escritura exclusiva
//! del Route Lifecycle Manager una vez que el vehículo participa en rutas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado operacional del vehículo - mapea al ENUM vehicle_status
///
/// Invariante: `EnRoute` si y solo si exactamente una ruta activa
/// (planned o in_progress) lo referencia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    EnRoute,
    Maintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::EnRoute => "en_route",
            VehicleStatus::Maintenance => "maintenance",
        }
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate: String,
    pub make: String,
    pub model: String,
    pub capacity_kg: f64,
    pub status: VehicleStatus,
    pub position_lat: Option<f64>,
    pub position_lng: Option<f64>,
    pub created_at: DateTime<Utc>,
}
