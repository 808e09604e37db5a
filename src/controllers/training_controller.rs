//! Controller de capacitaciones
//!
//! CRUD de registros de capacitación más las consultas de análisis del
//! área de RRHH: estadísticas por categoría y conductores sin
//! capacitación reciente.

use std::sync::Arc;

use chrono::{Duration, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::UserResponse;
use crate::dto::training_dto::{
    CreateTrainingRequest, TrainingCategoryStats, TrainingFilters, TrainingResponse,
    UpdateTrainingRequest,
};
use crate::models::user::UserRole;
use crate::repositories::store::{
    NewTraining, ResourceStore, TrainingPatch, TrainingQuery, TrainingStore, UserStore,
};
use crate::utils::errors::AppResult;

pub struct TrainingController {
    store: Arc<dyn ResourceStore>,
}

impl TrainingController {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, request: CreateTrainingRequest) -> AppResult<TrainingResponse> {
        request.validate()?;

        // El usuario debe existir antes de colgarle una capacitación
        let user = self.store.get_user(request.user_id).await?;

        let record = self
            .store
            .create_training(NewTraining {
                user_id: user.id,
                topic: request.topic,
                training_date: request.training_date,
                category: request.category.unwrap_or_else(|| "general".to_string()),
                institution: request.institution,
                certification: request
                    .certification
                    .unwrap_or_else(|| "not_applicable".to_string()),
                duration_hours: request.duration_hours,
                score: request.score,
                notes: request.notes,
            })
            .await?;

        Ok(record.into())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<TrainingResponse> {
        let record = self.store.get_training(id).await?;
        Ok(record.into())
    }

    pub async fn list(&self, filters: TrainingFilters) -> AppResult<Vec<TrainingResponse>> {
        let records = self
            .store
            .list_trainings(TrainingQuery {
                user_id: filters.user_id,
                category: filters.category,
                from: filters.from,
                to: filters.to,
            })
            .await?;
        Ok(records.into_iter().map(TrainingResponse::from).collect())
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<TrainingResponse>> {
        // Valida la existencia del usuario para distinguir 404 de lista vacía
        self.store.get_user(user_id).await?;
        let records = self
            .store
            .list_trainings(TrainingQuery {
                user_id: Some(user_id),
                ..Default::default()
            })
            .await?;
        Ok(records.into_iter().map(TrainingResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateTrainingRequest,
    ) -> AppResult<TrainingResponse> {
        request.validate()?;

        let record = self
            .store
            .update_training(
                id,
                TrainingPatch {
                    topic: request.topic,
                    training_date: request.training_date,
                    category: request.category,
                    institution: request.institution,
                    certification: request.certification,
                    duration_hours: request.duration_hours,
                    score: request.score,
                    notes: request.notes,
                },
            )
            .await?;

        Ok(record.into())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.store.get_training(id).await?;
        self.store.delete_training(id).await
    }

    /// Conductores sin ninguna capacitación en los últimos 12 meses
    pub async fn untrained_drivers(&self) -> AppResult<Vec<UserResponse>> {
        let cutoff = Utc::now() - Duration::days(365);

        let recent = self
            .store
            .list_trainings(TrainingQuery {
                from: Some(cutoff),
                ..Default::default()
            })
            .await?;

        let users = self.store.list_users().await?;
        let untrained = users
            .into_iter()
            .filter(|u| u.role == UserRole::Driver)
            .filter(|u| !recent.iter().any(|t| t.user_id == u.id))
            .map(UserResponse::from)
            .collect();

        Ok(untrained)
    }

    /// Estadísticas por categoría: cantidad y promedio de calificación
    pub async fn stats_by_category(&self) -> AppResult<Vec<TrainingCategoryStats>> {
        let records = self.store.list_trainings(TrainingQuery::default()).await?;

        let mut grouped: BTreeMap<String, (usize, Vec<f64>)> = BTreeMap::new();
        for record in records {
            let entry = grouped.entry(record.category).or_default();
            entry.0 += 1;
            if let Some(score) = record.score {
                entry.1.push(score);
            }
        }

        let stats = grouped
            .into_iter()
            .map(|(category, (total, scores))| TrainingCategoryStats {
                category,
                total,
                average_score: if scores.is_empty() {
                    None
                } else {
                    Some(scores.iter().sum::<f64>() / scores.len() as f64)
                },
            })
            .collect();

        Ok(stats)
    }
}
