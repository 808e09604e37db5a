//! Tests de integración del ciclo de vida de rutas sobre el store en memoria

use std::sync::Arc;

use fleet_logistics::controllers::route_controller::RouteController;
use fleet_logistics::dto::route_dto::{CreateRouteRequest, UpdateRouteStateRequest};
use fleet_logistics::models::cargo::{Cargo, CargoCategory, CargoPriority, CargoStatus};
use fleet_logistics::models::route::RouteState;
use fleet_logistics::models::user::{User, UserRole};
use fleet_logistics::models::vehicle::{Vehicle, VehicleStatus};
use fleet_logistics::repositories::memory::MemoryResourceStore;
use fleet_logistics::repositories::store::{
    CargoStore, NewCargo, NewUser, NewVehicle, RouteStore, UserStore, VehicleStore,
};
use fleet_logistics::utils::errors::AppError;

async fn seed_driver(store: &Arc<MemoryResourceStore>) -> User {
    store
        .create_user(NewUser {
            email: format!("driver-{}@test.cl", uuid::Uuid::new_v4()),
            password_hash: "x".to_string(),
            full_name: "Test Driver".to_string(),
            role: UserRole::Driver,
        })
        .await
        .unwrap()
}

async fn seed_vehicle(store: &Arc<MemoryResourceStore>, capacity_kg: f64) -> Vehicle {
    store
        .create_vehicle(NewVehicle {
            plate: format!("TT-{}", &uuid::Uuid::new_v4().simple().to_string()[..6]),
            make: "Volvo".to_string(),
            model: "FH".to_string(),
            capacity_kg,
            position_lat: None,
            position_lng: None,
        })
        .await
        .unwrap()
}

async fn seed_cargo(store: &Arc<MemoryResourceStore>, weight_kg: f64) -> Cargo {
    store
        .create_cargo(NewCargo {
            description: "Test cargo".to_string(),
            weight_kg,
            category: CargoCategory::Normal,
            priority: CargoPriority::Medium,
            origin: "Santiago".to_string(),
            destination: "Valparaíso".to_string(),
        })
        .await
        .unwrap()
}

fn create_request(vehicle: &Vehicle, cargo: &Cargo, driver: &User) -> CreateRouteRequest {
    CreateRouteRequest {
        vehicle_id: vehicle.id,
        cargo_id: cargo.id,
        driver_id: driver.id,
        origin: "Santiago".to_string(),
        destination: "Valparaíso".to_string(),
        distance_km: Some(116.0),
        waypoints: vec![],
    }
}

fn transition(state: RouteState) -> UpdateRouteStateRequest {
    UpdateRouteStateRequest {
        state,
        distance_km: None,
        started_at: None,
        ended_at: None,
    }
}

#[tokio::test]
async fn create_route_reserves_vehicle_and_cargo() {
    let store = Arc::new(MemoryResourceStore::new());
    let controller = RouteController::new(store.clone());
    let driver = seed_driver(&store).await;
    let vehicle = seed_vehicle(&store, 10000.0).await;
    let cargo = seed_cargo(&store, 2500.0).await;

    let route = controller
        .create(create_request(&vehicle, &cargo, &driver))
        .await
        .unwrap();

    assert_eq!(route.state, RouteState::Planned);
    assert_eq!(
        store.get_vehicle(vehicle.id).await.unwrap().status,
        VehicleStatus::EnRoute
    );
    assert_eq!(
        store.get_cargo(cargo.id).await.unwrap().status,
        CargoStatus::Assigned
    );
}

#[tokio::test]
async fn create_route_rejects_unavailable_vehicle() {
    let store = Arc::new(MemoryResourceStore::new());
    let controller = RouteController::new(store.clone());
    let driver = seed_driver(&store).await;
    let vehicle = seed_vehicle(&store, 10000.0).await;
    let cargo = seed_cargo(&store, 2500.0).await;

    store
        .set_vehicle_status(vehicle.id, VehicleStatus::Maintenance)
        .await
        .unwrap();

    let err = controller
        .create(create_request(&vehicle, &cargo, &driver))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    // sin efectos parciales
    assert_eq!(
        store.get_cargo(cargo.id).await.unwrap().status,
        CargoStatus::Pending
    );
    assert!(store.list_routes(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_route_rejects_reserved_cargo_without_leaking_vehicle() {
    let store = Arc::new(MemoryResourceStore::new());
    let controller = RouteController::new(store.clone());
    let driver = seed_driver(&store).await;
    let vehicle = seed_vehicle(&store, 10000.0).await;
    let cargo = seed_cargo(&store, 2500.0).await;

    store
        .set_cargo_status(cargo.id, CargoStatus::Assigned)
        .await
        .unwrap();

    let err = controller
        .create(create_request(&vehicle, &cargo, &driver))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    // el vehículo no queda reservado por un create fallido
    assert_eq!(
        store.get_vehicle(vehicle.id).await.unwrap().status,
        VehicleStatus::Available
    );
}

#[tokio::test]
async fn create_route_rejects_overweight_cargo() {
    let store = Arc::new(MemoryResourceStore::new());
    let controller = RouteController::new(store.clone());
    let driver = seed_driver(&store).await;
    let vehicle = seed_vehicle(&store, 1000.0).await;
    let cargo = seed_cargo(&store, 1500.0).await;

    let err = controller
        .create(create_request(&vehicle, &cargo, &driver))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CapacityExceeded { .. }));
    assert_eq!(
        store.get_vehicle(vehicle.id).await.unwrap().status,
        VehicleStatus::Available
    );
}

#[tokio::test]
async fn create_route_rejects_non_driver_user() {
    let store = Arc::new(MemoryResourceStore::new());
    let controller = RouteController::new(store.clone());
    let vehicle = seed_vehicle(&store, 10000.0).await;
    let cargo = seed_cargo(&store, 2500.0).await;

    let clerk = store
        .create_user(NewUser {
            email: "clerk@test.cl".to_string(),
            password_hash: "x".to_string(),
            full_name: "Not A Driver".to_string(),
            role: UserRole::Logistics,
        })
        .await
        .unwrap();

    let err = controller
        .create(create_request(&vehicle, &cargo, &clerk))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn concurrent_creates_on_same_resources_yield_one_route() {
    let store = Arc::new(MemoryResourceStore::new());
    let driver = seed_driver(&store).await;
    let vehicle = seed_vehicle(&store, 10000.0).await;
    let cargo = seed_cargo(&store, 2500.0).await;

    let request = create_request(&vehicle, &cargo, &driver);
    let mut handles = Vec::new();
    for _ in 0..2 {
        let store = store.clone();
        let request = request.clone();
        handles.push(tokio::spawn(async move {
            RouteController::new(store).create(request).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1, "exactly one of the concurrent creates may win");
    assert_eq!(store.list_routes(None).await.unwrap().len(), 1);
    assert_eq!(
        store.get_vehicle(vehicle.id).await.unwrap().status,
        VehicleStatus::EnRoute
    );
    assert_eq!(
        store.get_cargo(cargo.id).await.unwrap().status,
        CargoStatus::Assigned
    );
}

#[tokio::test]
async fn route_follows_planned_in_progress_completed_path() {
    let store = Arc::new(MemoryResourceStore::new());
    let controller = RouteController::new(store.clone());
    let driver = seed_driver(&store).await;
    let vehicle = seed_vehicle(&store, 10000.0).await;
    let cargo = seed_cargo(&store, 2500.0).await;

    let route = controller
        .create(create_request(&vehicle, &cargo, &driver))
        .await
        .unwrap();

    let route = controller
        .update_state(route.id, transition(RouteState::InProgress))
        .await
        .unwrap();
    assert_eq!(route.state, RouteState::InProgress);

    let route = controller
        .update_state(route.id, transition(RouteState::Completed))
        .await
        .unwrap();
    assert_eq!(route.state, RouteState::Completed);
    assert!(route.ended_at.is_some());

    // la entrega libera el vehículo y marca la carga como entregada
    assert_eq!(
        store.get_vehicle(vehicle.id).await.unwrap().status,
        VehicleStatus::Available
    );
    assert_eq!(
        store.get_cargo(cargo.id).await.unwrap().status,
        CargoStatus::Delivered
    );
}

#[tokio::test]
async fn planned_route_cannot_jump_to_completed() {
    let store = Arc::new(MemoryResourceStore::new());
    let controller = RouteController::new(store.clone());
    let driver = seed_driver(&store).await;
    let vehicle = seed_vehicle(&store, 10000.0).await;
    let cargo = seed_cargo(&store, 2500.0).await;

    let route = controller
        .create(create_request(&vehicle, &cargo, &driver))
        .await
        .unwrap();

    let err = controller
        .update_state(route.id, transition(RouteState::Completed))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InvalidTransition {
            from: RouteState::Planned,
            to: RouteState::Completed,
        }
    ));

    // la transición rechazada no toca las entidades
    assert_eq!(
        store.get_vehicle(vehicle.id).await.unwrap().status,
        VehicleStatus::EnRoute
    );
    assert_eq!(
        store.get_cargo(cargo.id).await.unwrap().status,
        CargoStatus::Assigned
    );
}

#[tokio::test]
async fn cancelling_a_route_releases_both_resources() {
    let store = Arc::new(MemoryResourceStore::new());
    let controller = RouteController::new(store.clone());
    let driver = seed_driver(&store).await;
    let vehicle = seed_vehicle(&store, 10000.0).await;
    let cargo = seed_cargo(&store, 2500.0).await;

    let route = controller
        .create(create_request(&vehicle, &cargo, &driver))
        .await
        .unwrap();
    controller
        .update_state(route.id, transition(RouteState::InProgress))
        .await
        .unwrap();

    let cancelled = controller
        .update_state(route.id, transition(RouteState::Cancelled))
        .await
        .unwrap();
    assert_eq!(cancelled.state, RouteState::Cancelled);
    assert!(cancelled.ended_at.is_some());
    assert_eq!(
        store.get_vehicle(vehicle.id).await.unwrap().status,
        VehicleStatus::Available
    );
    assert_eq!(
        store.get_cargo(cargo.id).await.unwrap().status,
        CargoStatus::Pending
    );
}

#[tokio::test]
async fn terminal_routes_reject_further_transitions() {
    let store = Arc::new(MemoryResourceStore::new());
    let controller = RouteController::new(store.clone());
    let driver = seed_driver(&store).await;
    let vehicle = seed_vehicle(&store, 10000.0).await;
    let cargo = seed_cargo(&store, 2500.0).await;

    let route = controller
        .create(create_request(&vehicle, &cargo, &driver))
        .await
        .unwrap();
    controller
        .update_state(route.id, transition(RouteState::Cancelled))
        .await
        .unwrap();

    // la carga ya fue liberada; reservarla de nuevo no debe pasar por acá
    for target in [
        RouteState::InProgress,
        RouteState::Completed,
        RouteState::Cancelled,
    ] {
        let err = controller
            .update_state(route.id, transition(target))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));
    }
}

#[tokio::test]
async fn released_resources_can_back_a_new_route() {
    let store = Arc::new(MemoryResourceStore::new());
    let controller = RouteController::new(store.clone());
    let driver = seed_driver(&store).await;
    let vehicle = seed_vehicle(&store, 10000.0).await;
    let cargo = seed_cargo(&store, 2500.0).await;

    let first = controller
        .create(create_request(&vehicle, &cargo, &driver))
        .await
        .unwrap();
    controller
        .update_state(first.id, transition(RouteState::Cancelled))
        .await
        .unwrap();

    let second = controller
        .create(create_request(&vehicle, &cargo, &driver))
        .await
        .unwrap();
    assert_eq!(second.state, RouteState::Planned);
}

#[tokio::test]
async fn deleting_an_active_route_requires_force() {
    let store = Arc::new(MemoryResourceStore::new());
    let controller = RouteController::new(store.clone());
    let driver = seed_driver(&store).await;
    let vehicle = seed_vehicle(&store, 10000.0).await;
    let cargo = seed_cargo(&store, 2500.0).await;

    let route = controller
        .create(create_request(&vehicle, &cargo, &driver))
        .await
        .unwrap();

    let err = controller.delete(route.id, false).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    assert!(controller.get(route.id).await.is_ok());

    controller.delete(route.id, true).await.unwrap();
    assert!(matches!(
        controller.get(route.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));

    // el force-delete libera como una cancelación
    assert_eq!(
        store.get_vehicle(vehicle.id).await.unwrap().status,
        VehicleStatus::Available
    );
    assert_eq!(
        store.get_cargo(cargo.id).await.unwrap().status,
        CargoStatus::Pending
    );
}

#[tokio::test]
async fn deleting_a_terminal_route_keeps_resource_statuses() {
    let store = Arc::new(MemoryResourceStore::new());
    let controller = RouteController::new(store.clone());
    let driver = seed_driver(&store).await;
    let vehicle = seed_vehicle(&store, 10000.0).await;
    let cargo = seed_cargo(&store, 2500.0).await;

    let route = controller
        .create(create_request(&vehicle, &cargo, &driver))
        .await
        .unwrap();
    controller
        .update_state(route.id, transition(RouteState::InProgress))
        .await
        .unwrap();
    controller
        .update_state(route.id, transition(RouteState::Completed))
        .await
        .unwrap();

    controller.delete(route.id, false).await.unwrap();

    // eliminar el registro histórico no revive la carga entregada
    assert_eq!(
        store.get_cargo(cargo.id).await.unwrap().status,
        CargoStatus::Delivered
    );
}

#[tokio::test]
async fn list_routes_filters_by_state() {
    let store = Arc::new(MemoryResourceStore::new());
    let controller = RouteController::new(store.clone());
    let driver = seed_driver(&store).await;

    let vehicle_a = seed_vehicle(&store, 10000.0).await;
    let cargo_a = seed_cargo(&store, 2500.0).await;
    let vehicle_b = seed_vehicle(&store, 10000.0).await;
    let cargo_b = seed_cargo(&store, 2500.0).await;

    let route_a = controller
        .create(create_request(&vehicle_a, &cargo_a, &driver))
        .await
        .unwrap();
    controller
        .create(create_request(&vehicle_b, &cargo_b, &driver))
        .await
        .unwrap();
    controller
        .update_state(route_a.id, transition(RouteState::InProgress))
        .await
        .unwrap();

    let in_progress = controller.list(Some(RouteState::InProgress)).await.unwrap();
    assert_eq!(in_progress.len(), 1);
    assert_eq!(in_progress[0].id, route_a.id);

    let all = controller.list(None).await.unwrap();
    assert_eq!(all.len(), 2);
}
