//! Composición del router HTTP
//!
//! `/api/auth/login` y `/api/auth/register` son públicos; todo lo demás
//! bajo `/api` exige un token Bearer válido.

pub mod auth_routes;
pub mod cargo_routes;
pub mod dashboard_routes;
pub mod route_routes;
pub mod training_routes;
pub mod user_routes;
pub mod vehicle_routes;

use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::auth::require_auth;
use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/cargos", cargo_routes::create_cargo_router())
        .nest("/routes", route_routes::create_route_router())
        .nest("/trainings", training_routes::create_training_router())
        .nest("/users", user_routes::create_user_router())
        .nest("/dashboard", dashboard_routes::create_dashboard_router())
        .route_layer(middleware::from_fn(require_auth));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes::create_auth_router())
        .nest("/api", protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet-logistics-api",
    }))
}
