//! DTOs de Cargo

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::cargo::{Cargo, CargoCategory, CargoPriority, CargoStatus};

/// Request para registrar una nueva carga
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCargoRequest {
    #[validate(length(min = 3, max = 255))]
    pub description: String,

    #[validate(range(min = 0.001, message = "weight must be positive"))]
    pub weight_kg: f64,

    #[serde(default)]
    pub category: CargoCategory,

    #[serde(default)]
    pub priority: CargoPriority,

    #[validate(length(min = 2, max = 255))]
    pub origin: String,

    #[validate(length(min = 2, max = 255))]
    pub destination: String,
}

/// Request para actualizar una carga existente
///
/// No expone `status`: ese campo lo gobierna el ciclo de vida de rutas.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCargoRequest {
    #[validate(length(min = 3, max = 255))]
    pub description: Option<String>,

    #[validate(range(min = 0.001, message = "weight must be positive"))]
    pub weight_kg: Option<f64>,

    pub category: Option<CargoCategory>,
    pub priority: Option<CargoPriority>,

    #[validate(length(min = 2, max = 255))]
    pub origin: Option<String>,

    #[validate(length(min = 2, max = 255))]
    pub destination: Option<String>,
}

/// Response de carga para la API
#[derive(Debug, Serialize)]
pub struct CargoResponse {
    pub id: Uuid,
    pub description: String,
    pub weight_kg: f64,
    pub category: CargoCategory,
    pub priority: CargoPriority,
    pub status: CargoStatus,
    pub origin: String,
    pub destination: String,
    pub created_at: DateTime<Utc>,
}

impl From<Cargo> for CargoResponse {
    fn from(cargo: Cargo) -> Self {
        Self {
            id: cargo.id,
            description: cargo.description,
            weight_kg: cargo.weight_kg,
            category: cargo.category,
            priority: cargo.priority,
            status: cargo.status,
            origin: cargo.origin,
            destination: cargo.destination,
            created_at: cargo.created_at,
        }
    }
}
