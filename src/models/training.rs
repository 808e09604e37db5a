//! Modelo de TrainingRecord (registro de capacitación)
//!
//! Uno-a-muchos colgando de User. CRUD puro, sin invariantes cruzadas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Registro de capacitación de un trabajador
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrainingRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub topic: String,
    pub training_date: DateTime<Utc>,
    pub category: String,
    pub institution: Option<String>,
    pub certification: String,
    pub duration_hours: Option<i32>,
    pub score: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
