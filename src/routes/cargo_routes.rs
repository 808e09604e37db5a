//! Rutas de cargas

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::cargo_controller::CargoController;
use crate::dto::cargo_dto::{CargoResponse, CreateCargoRequest, UpdateCargoRequest};
use crate::middleware::auth::AuthUser;
use crate::services::policy_service::{self, Operation};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_cargo_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cargos).post(create_cargo))
        .route("/:id", get(get_cargo).put(update_cargo).delete(delete_cargo))
}

async fn create_cargo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateCargoRequest>,
) -> Result<(StatusCode, Json<CargoResponse>), AppError> {
    policy_service::authorize(user.role, Operation::CreateCargo)?;
    let controller = CargoController::new(state.store.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_cargos(State(state): State<AppState>) -> Result<Json<Vec<CargoResponse>>, AppError> {
    let controller = CargoController::new(state.store.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_cargo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CargoResponse>, AppError> {
    let controller = CargoController::new(state.store.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_cargo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCargoRequest>,
) -> Result<Json<CargoResponse>, AppError> {
    policy_service::authorize(user.role, Operation::UpdateCargo)?;
    let controller = CargoController::new(state.store.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_cargo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    policy_service::authorize(user.role, Operation::DeleteCargo)?;
    let controller = CargoController::new(state.store.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
