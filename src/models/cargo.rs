//! Modelo de Cargo
//!
//! Mapea a la tabla `cargos`. Igual que con Vehicle, el campo `status`
//! lo escribe únicamente el Route Lifecycle Manager a partir del momento
//! en que la carga queda asignada a una ruta.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la carga - mapea al ENUM cargo_status
///
/// Invariante: `Assigned`/`InTransit` si y solo si una ruta activa la
/// referencia; `Pending` siempre que ninguna lo haga. `Delivered` es terminal:
/// un nuevo envío requiere un registro de carga nuevo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "cargo_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CargoStatus {
    Pending,
    Assigned,
    InTransit,
    Delivered,
}

impl CargoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CargoStatus::Pending => "pending",
            CargoStatus::Assigned => "assigned",
            CargoStatus::InTransit => "in_transit",
            CargoStatus::Delivered => "delivered",
        }
    }
}

/// Categoría de la carga - mapea al ENUM cargo_category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "cargo_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CargoCategory {
    #[default]
    Normal,
    Fragile,
    HighValue,
}

/// Prioridad de la carga - mapea al ENUM cargo_priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "cargo_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CargoPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// Cargo principal - mapea exactamente a la tabla cargos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cargo {
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
