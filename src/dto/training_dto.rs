//! DTOs de capacitaciones

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::training::TrainingRecord;

/// Request para registrar una capacitación
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTrainingRequest {
    pub user_id: Uuid,

    #[validate(length(min = 3, max = 255))]
    pub topic: String,

    pub training_date: DateTime<Utc>,

    /// Si no viene informada se registra como "general"
    pub category: Option<String>,

    pub institution: Option<String>,

    /// Estado de certificación; por defecto "not_applicable"
    pub certification: Option<String>,

    #[validate(range(min = 1, max = 1000))]
    pub duration_hours: Option<i32>,

    #[validate(range(min = 0.0, max = 100.0))]
    pub score: Option<f64>,

    pub notes: Option<String>,
}

/// Request para actualizar una capacitación
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTrainingRequest {
    #[validate(length(min = 3, max = 255))]
    pub topic: Option<String>,

    pub training_date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub institution: Option<String>,
    pub certification: Option<String>,

    #[validate(range(min = 1, max = 1000))]
    pub duration_hours: Option<i32>,

    #[validate(range(min = 0.0, max = 100.0))]
    pub score: Option<f64>,

    pub notes: Option<String>,
}

/// Filtros de búsqueda de capacitaciones
#[derive(Debug, Default, Deserialize)]
pub struct TrainingFilters {
    pub user_id: Option<Uuid>,
    pub category: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Response de capacitación
#[derive(Debug, Serialize)]
pub struct TrainingResponse {
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

impl From<TrainingRecord> for TrainingResponse {
    fn from(record: TrainingRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            topic: record.topic,
            training_date: record.training_date,
            category: record.category,
            institution: record.institution,
            certification: record.certification,
            duration_hours: record.duration_hours,
            score: record.score,
            notes: record.notes,
            created_at: record.created_at,
        }
    }
}

/// Estadísticas de capacitación por categoría
#[derive(Debug, Serialize)]
pub struct TrainingCategoryStats {
    pub category: String,
    pub total: usize,
    pub average_score: Option<f64>,
}
