//! Rutas del ciclo de vida de rutas de reparto

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::{
    CreateRouteRequest, DeleteRouteParams, RouteFilters, RouteResponse, UpdateRouteStateRequest,
};
use crate::middleware::auth::AuthUser;
use crate::services::policy_service::{self, Operation};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes).post(create_route))
        .route(
            "/:id",
            get(get_route).put(update_route_state).delete(delete_route),
        )
}

async fn create_route(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<(StatusCode, Json<RouteResponse>), AppError> {
    policy_service::authorize(user.role, Operation::CreateRoute)?;
    let controller = RouteController::new(state.store.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_routes(
    State(state): State<AppState>,
    Query(filters): Query<RouteFilters>,
) -> Result<Json<Vec<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.store.clone());
    let response = controller.list(filters.state).await?;
    Ok(Json(response))
}

async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteResponse>, AppError> {
    let controller = RouteController::new(state.store.clone());
    let response = controller.get(id).await?;
    Ok(Json(response))
}

async fn update_route_state(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRouteStateRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    policy_service::authorize(user.role, Operation::UpdateRoute)?;
    let controller = RouteController::new(state.store.clone());
    let response = controller.update_state(id, request).await?;
    Ok(Json(response))
}

async fn delete_route(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteRouteParams>,
) -> Result<StatusCode, AppError> {
    policy_service::authorize(user.role, Operation::DeleteRoute)?;
    let controller = RouteController::new(state.store.clone());
    controller.delete(id, params.force).await?;
    Ok(StatusCode::NO_CONTENT)
}
