//! Seed de datos de demostración
//!
//! `cargo run --bin seed` — crea usuarios para los cuatro roles,
//! una flota pequeña, cargas pendientes y una ruta planificada coherente.
//! Idempotencia simple: si el admin logístico ya existe, no hace nada.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};
use dotenvy::dotenv;
use tracing::info;

use fleet_logistics::database::connection::{create_pool, run_migrations};
use fleet_logistics::models::cargo::{CargoCategory, CargoPriority, CargoStatus};
use fleet_logistics::models::user::UserRole;
use fleet_logistics::models::vehicle::VehicleStatus;
use fleet_logistics::repositories::postgres::PgResourceStore;
use fleet_logistics::repositories::store::{
    CargoStore, NewCargo, NewRoute, NewTraining, NewUser, NewVehicle, ResourceStore, RouteStore,
    TrainingStore, UserStore, VehicleStore,
};

const SEED_PASSWORD: &str = "password123";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt().init();

    let pool = create_pool(None).await?;
    run_migrations(&pool).await?;
    let store: Arc<dyn ResourceStore> = Arc::new(PgResourceStore::new(pool));

    if store.find_user_by_email("logistica@fleet.cl").await?.is_some() {
        info!("seed data already present, nothing to do");
        return Ok(());
    }

    let password_hash = bcrypt::hash(SEED_PASSWORD, bcrypt::DEFAULT_COST)?;

    let logistics = store
        .create_user(NewUser {
            email: "logistica@fleet.cl".to_string(),
            password_hash: password_hash.clone(),
            full_name: "Carolina Soto".to_string(),
            role: UserRole::Logistics,
        })
        .await?;
    store
        .create_user(NewUser {
            email: "rrhh@fleet.cl".to_string(),
            password_hash: password_hash.clone(),
            full_name: "Andrés Fuentes".to_string(),
            role: UserRole::Hr,
        })
        .await?;
    store
        .create_user(NewUser {
            email: "seguridad@fleet.cl".to_string(),
            password_hash: password_hash.clone(),
            full_name: "Paula Reyes".to_string(),
            role: UserRole::Security,
        })
        .await?;
    let driver = store
        .create_user(NewUser {
            email: "conductor@fleet.cl".to_string(),
            password_hash,
            full_name: "Marcelo Díaz".to_string(),
            role: UserRole::Driver,
        })
        .await?;
    info!(logistics = %logistics.email, driver = %driver.email, "users created");

    let truck = store
        .create_vehicle(NewVehicle {
            plate: "GHXZ-23".to_string(),
            make: "Mercedes-Benz".to_string(),
            model: "Actros".to_string(),
            capacity_kg: 18000.0,
            position_lat: Some(-33.4489),
            position_lng: Some(-70.6693),
        })
        .await?;
    store
        .create_vehicle(NewVehicle {
            plate: "JPRK-81".to_string(),
            make: "Volvo".to_string(),
            model: "FH".to_string(),
            capacity_kg: 20000.0,
            position_lat: Some(-33.0472),
            position_lng: Some(-71.6127),
        })
        .await?;
    store
        .create_vehicle(NewVehicle {
            plate: "LMWQ-47".to_string(),
            make: "Scania".to_string(),
            model: "R450".to_string(),
            capacity_kg: 16000.0,
            position_lat: None,
            position_lng: None,
        })
        .await?;

    let pallets = store
        .create_cargo(NewCargo {
            description: "Pallets de electrodomésticos".to_string(),
            weight_kg: 5200.0,
            category: CargoCategory::Normal,
            priority: CargoPriority::High,
            origin: "Santiago".to_string(),
            destination: "Valparaíso".to_string(),
        })
        .await?;
    store
        .create_cargo(NewCargo {
            description: "Instrumental de laboratorio".to_string(),
            weight_kg: 800.0,
            category: CargoCategory::Fragile,
            priority: CargoPriority::Urgent,
            origin: "Santiago".to_string(),
            destination: "Concepción".to_string(),
        })
        .await?;
    store
        .create_cargo(NewCargo {
            description: "Equipos de minería".to_string(),
            weight_kg: 14500.0,
            category: CargoCategory::HighValue,
            priority: CargoPriority::Medium,
            origin: "Antofagasta".to_string(),
            destination: "Calama".to_string(),
        })
        .await?;

    // Una ruta planificada coherente: el vehículo queda en ruta y la
    // carga asignada, igual que si la hubiera creado la API.
    store
        .set_vehicle_status_if(truck.id, VehicleStatus::Available, VehicleStatus::EnRoute)
        .await?;
    store
        .set_cargo_status_if(pallets.id, CargoStatus::Pending, CargoStatus::Assigned)
        .await?;
    let route = store
        .create_route(NewRoute {
            vehicle_id: truck.id,
            cargo_id: pallets.id,
            driver_id: driver.id,
            origin: "Santiago".to_string(),
            destination: "Valparaíso".to_string(),
            distance_km: Some(116.0),
            waypoints: vec![],
        })
        .await?;
    info!(route_id = %route.id, "planned route created");

    store
        .create_training(NewTraining {
            user_id: driver.id,
            topic: "Manejo defensivo".to_string(),
            training_date: Utc::now() - Duration::days(30),
            category: "seguridad_vial".to_string(),
            institution: Some("Mutual de Seguridad".to_string()),
            certification: "approved".to_string(),
            duration_hours: Some(8),
            score: Some(92.0),
            notes: None,
        })
        .await?;

    info!("seed completed: 4 users, 3 vehicles, 3 cargos, 1 route, 1 training");
    Ok(())
}
