//! Rutas de usuarios

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::UserResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let controller = AuthController::new(state.store.clone());
    let response = controller.list_users().await?;
    Ok(Json(response))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let controller = AuthController::new(state.store.clone());
    let response = controller.get_user(id).await?;
    Ok(Json(response))
}
