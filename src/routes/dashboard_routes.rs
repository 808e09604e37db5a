//! Rutas del dashboard operativo

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::dashboard_dto::{ActiveRouteSummary, ActiveRoutesParams, DashboardStats};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/active-routes", get(active_routes))
}

async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let controller = DashboardController::new(state.store.clone());
    let response = controller.stats().await?;
    Ok(Json(response))
}

async fn active_routes(
    State(state): State<AppState>,
    Query(params): Query<ActiveRoutesParams>,
) -> Result<Json<Vec<ActiveRouteSummary>>, AppError> {
    let controller = DashboardController::new(state.store.clone());
    let response = controller.active_routes(params.limit).await?;
    Ok(Json(response))
}
