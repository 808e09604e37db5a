//! Tests del router HTTP: autenticación, autorización por rol y el
//! flujo login → crear recursos → crear ruta, contra el store en memoria.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use fleet_logistics::config::environment::EnvironmentConfig;
use fleet_logistics::models::user::UserRole;
use fleet_logistics::repositories::memory::MemoryResourceStore;
use fleet_logistics::repositories::store::{NewUser, UserStore};
use fleet_logistics::routes::build_router;
use fleet_logistics::state::AppState;

fn test_app() -> (Router, Arc<MemoryResourceStore>) {
    let store = Arc::new(MemoryResourceStore::new());
    let state = AppState::new(store.clone(), EnvironmentConfig::default());
    (build_router(state), store)
}

async fn seed_user(store: &Arc<MemoryResourceStore>, email: &str, role: UserRole) {
    let password_hash = bcrypt::hash("password123", 4).unwrap();
    store
        .create_user(NewUser {
            email: email.to_string(),
            password_hash,
            full_name: "Test User".to_string(),
            role,
        })
        .await
        .unwrap();
}

async fn login(app: &Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "email": email, "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_check_is_public() {
    let (app, _) = test_app();
    let response = app.oneshot(get_request("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn api_requires_a_bearer_token() {
    let (app, _) = test_app();
    let response = app
        .oneshot(get_request("/api/vehicles", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let (app, _) = test_app();
    let response = app
        .oneshot(get_request("/api/vehicles", Some("not-a-jwt")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_bad_password() {
    let (app, store) = test_app();
    seed_user(&store, "logistica@test.cl", UserRole::Logistics).await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "email": "logistica@test.cl", "password": "wrong-password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn driver_cannot_create_vehicles() {
    let (app, store) = test_app();
    seed_user(&store, "conductor@test.cl", UserRole::Driver).await;
    let token = login(&app, "conductor@test.cl").await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/vehicles",
            Some(&token),
            json!({
                "plate": "AB-1234",
                "make": "Volvo",
                "model": "FH",
                "capacity_kg": 18000.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn security_cannot_create_routes() {
    let (app, store) = test_app();
    seed_user(&store, "seguridad@test.cl", UserRole::Security).await;
    let token = login(&app, "seguridad@test.cl").await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/routes",
            Some(&token),
            json!({
                "vehicle_id": uuid::Uuid::new_v4(),
                "cargo_id": uuid::Uuid::new_v4(),
                "driver_id": uuid::Uuid::new_v4(),
                "origin": "Santiago",
                "destination": "Valparaíso"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn logistics_can_run_the_full_route_flow() {
    let (app, store) = test_app();
    seed_user(&store, "logistica@test.cl", UserRole::Logistics).await;
    seed_user(&store, "conductor@test.cl", UserRole::Driver).await;
    let token = login(&app, "logistica@test.cl").await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/vehicles",
            Some(&token),
            json!({
                "plate": "AB-1234",
                "make": "Volvo",
                "model": "FH",
                "capacity_kg": 18000.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let vehicle = read_json(response).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/cargos",
            Some(&token),
            json!({
                "description": "Pallets",
                "weight_kg": 5000.0,
                "origin": "Santiago",
                "destination": "Valparaíso"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let cargo = read_json(response).await;

    let response = app
        .clone()
        .oneshot(get_request("/api/users", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let users = read_json(response).await;
    let driver_id = users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["role"] == "driver")
        .unwrap()["id"]
        .clone();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/routes",
            Some(&token),
            json!({
                "vehicle_id": vehicle["id"],
                "cargo_id": cargo["id"],
                "driver_id": driver_id,
                "origin": "Santiago",
                "destination": "Valparaíso",
                "distance_km": 116.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let route = read_json(response).await;
    assert_eq!(route["state"], "planned");

    // el vehículo quedó reservado por la ruta
    let response = app
        .clone()
        .oneshot(get_request(
            &format!("/api/vehicles/{}", vehicle["id"].as_str().unwrap()),
            Some(&token),
        ))
        .await
        .unwrap();
    let reserved = read_json(response).await;
    assert_eq!(reserved["status"], "en_route");

    // un segundo intento sobre los mismos recursos falla sin efectos
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/routes",
            Some(&token),
            json!({
                "vehicle_id": vehicle["id"],
                "cargo_id": cargo["id"],
                "driver_id": driver_id,
                "origin": "Santiago",
                "destination": "Valparaíso"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/routes/{}", route["id"].as_str().unwrap()),
            Some(&token),
            json!({ "state": "in_progress" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["state"], "in_progress");
}

#[tokio::test]
async fn invalid_transition_maps_to_bad_request_payload() {
    let (app, store) = test_app();
    seed_user(&store, "logistica@test.cl", UserRole::Logistics).await;
    seed_user(&store, "conductor@test.cl", UserRole::Driver).await;
    let token = login(&app, "logistica@test.cl").await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/vehicles",
            Some(&token),
            json!({ "plate": "CD-5678", "make": "Scania", "model": "R450", "capacity_kg": 16000.0 }),
        ))
        .await
        .unwrap();
    let vehicle = read_json(response).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/cargos",
            Some(&token),
            json!({ "description": "Cajas", "weight_kg": 100.0, "origin": "A", "destination": "B" }),
        ))
        .await
        .unwrap();
    let cargo = read_json(response).await;

    let response = app
        .clone()
        .oneshot(get_request("/api/users", Some(&token)))
        .await
        .unwrap();
    let users = read_json(response).await;
    let driver_id = users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["role"] == "driver")
        .unwrap()["id"]
        .clone();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/routes",
            Some(&token),
            json!({
                "vehicle_id": vehicle["id"],
                "cargo_id": cargo["id"],
                "driver_id": driver_id,
                "origin": "A",
                "destination": "B"
            }),
        ))
        .await
        .unwrap();
    let route = read_json(response).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/routes/{}", route["id"].as_str().unwrap()),
            Some(&token),
            json!({ "state": "completed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert_eq!(body["code"], "INVALID_TRANSITION");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("planned"));
}

#[tokio::test]
async fn unknown_route_returns_not_found() {
    let (app, store) = test_app();
    seed_user(&store, "logistica@test.cl", UserRole::Logistics).await;
    let token = login(&app, "logistica@test.cl").await;

    let response = app
        .oneshot(get_request(
            &format!("/api/routes/{}", uuid::Uuid::new_v4()),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
