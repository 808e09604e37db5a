//! DTOs de Vehicle

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::{Vehicle, VehicleStatus};

lazy_static! {
    /// Formato de patente: bloques alfanuméricos opcionalmente separados por guión
    static ref PLATE_RE: Regex = Regex::new(r"^[A-Z0-9]{2,4}-?[A-Z0-9]{2,4}$").unwrap();
}

/// Request para registrar un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(regex(path = "PLATE_RE", message = "invalid plate format"))]
    pub plate: String,

    #[validate(length(min = 2, max = 100))]
    pub make: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1.0, message = "capacity must be positive"))]
    pub capacity_kg: f64,

    pub position_lat: Option<f64>,
    pub position_lng: Option<f64>,
}

/// Request para actualizar un vehículo existente
///
/// `status` solo admite aquí los estados que no gobierna el ciclo de vida
/// de rutas; poner un vehículo `en_route` a mano está prohibido.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(regex(path = "PLATE_RE", message = "invalid plate format"))]
    pub plate: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1.0, message = "capacity must be positive"))]
    pub capacity_kg: Option<f64>,

    pub status: Option<VehicleStatus>,

    pub position_lat: Option<f64>,
    pub position_lng: Option<f64>,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
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

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            plate: vehicle.plate,
            make: vehicle.make,
            model: vehicle.model,
            capacity_kg: vehicle.capacity_kg,
            status: vehicle.status,
            position_lat: vehicle.position_lat,
            position_lng: vehicle.position_lng,
            created_at: vehicle.created_at,
        }
    }
}
