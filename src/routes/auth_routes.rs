//! Rutas de autenticación

use axum::{
    extract::{Extension, State},
    middleware,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::{require_auth, AuthUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile))
        .route_layer(middleware::from_fn(require_auth))
        .route("/login", post(login))
        .route("/register", post(register))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state.store.clone());
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = AuthController::new(state.store.clone());
    let response = controller.register(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "User registered successfully".to_string(),
    )))
}

async fn profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>, AppError> {
    let controller = AuthController::new(state.store.clone());
    let response = controller.profile(user.id).await?;
    Ok(Json(response))
}
