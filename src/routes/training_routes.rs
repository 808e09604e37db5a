//! Rutas de capacitaciones

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::training_controller::TrainingController;
use crate::dto::auth_dto::UserResponse;
use crate::dto::training_dto::{
    CreateTrainingRequest, TrainingCategoryStats, TrainingFilters, TrainingResponse,
    UpdateTrainingRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_training_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trainings).post(create_training))
        .route("/stats/categories", get(stats_by_category))
        .route("/drivers/untrained", get(untrained_drivers))
        .route("/user/:user_id", get(list_by_user))
        .route(
            "/:id",
            get(get_training).put(update_training).delete(delete_training),
        )
}

async fn create_training(
    State(state): State<AppState>,
    Json(request): Json<CreateTrainingRequest>,
) -> Result<(StatusCode, Json<TrainingResponse>), AppError> {
    let controller = TrainingController::new(state.store.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_trainings(
    State(state): State<AppState>,
    Query(filters): Query<TrainingFilters>,
) -> Result<Json<Vec<TrainingResponse>>, AppError> {
    let controller = TrainingController::new(state.store.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_training(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TrainingResponse>, AppError> {
    let controller = TrainingController::new(state.store.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<TrainingResponse>>, AppError> {
    let controller = TrainingController::new(state.store.clone());
    let response = controller.list_by_user(user_id).await?;
    Ok(Json(response))
}

async fn update_training(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTrainingRequest>,
) -> Result<Json<TrainingResponse>, AppError> {
    let controller = TrainingController::new(state.store.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_training(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let controller = TrainingController::new(state.store.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn untrained_drivers(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let controller = TrainingController::new(state.store.clone());
    let response = controller.untrained_drivers().await?;
    Ok(Json(response))
}

async fn stats_by_category(
    State(state): State<AppState>,
) -> Result<Json<Vec<TrainingCategoryStats>>, AppError> {
    let controller = TrainingController::new(state.store.clone());
    let response = controller.stats_by_category().await?;
    Ok(Json(response))
}
