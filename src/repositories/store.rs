//! Contrato del Resource Store
//!
//! Acceso tipado y durable a las cuatro entidades, con restricciones de
//! unicidad (patente, email) y lecturas por id. Cada escritura por entidad es
//! atómica; la secuenciación de escrituras multi-entidad es responsabilidad
//! del Route Lifecycle Manager, que para reservar recursos usa las
//! transiciones condicionales de estado (`set_*_status_if`, un compare-and-set
//! sobre la columna `status`).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::cargo::{Cargo, CargoCategory, CargoPriority, CargoStatus};
use crate::models::route::{Route, RouteState, Waypoint};
use crate::models::training::TrainingRecord;
use crate::models::user::{User, UserRole};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::utils::errors::AppResult;

/// Campos para dar de alta un vehículo
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub plate: String,
    pub make: String,
    pub model: String,
    pub capacity_kg: f64,
    pub position_lat: Option<f64>,
    pub position_lng: Option<f64>,
}

/// Actualización parcial de un vehículo
#[derive(Debug, Clone, Default)]
pub struct VehiclePatch {
    pub plate: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub capacity_kg: Option<f64>,
    pub status: Option<VehicleStatus>,
    pub position_lat: Option<f64>,
    pub position_lng: Option<f64>,
}

/// Campos para dar de alta una carga
#[derive(Debug, Clone)]
pub struct NewCargo {
    pub description: String,
    pub weight_kg: f64,
    pub category: CargoCategory,
    pub priority: CargoPriority,
    pub origin: String,
    pub destination: String,
}

/// Actualización parcial de una carga
#[derive(Debug, Clone, Default)]
pub struct CargoPatch {
    pub description: Option<String>,
    pub weight_kg: Option<f64>,
    pub category: Option<CargoCategory>,
    pub priority: Option<CargoPriority>,
    pub origin: Option<String>,
    pub destination: Option<String>,
}

/// Campos para crear una ruta
#[derive(Debug, Clone)]
pub struct NewRoute {
    pub vehicle_id: Uuid,
    pub cargo_id: Uuid,
    pub driver_id: Uuid,
    pub origin: String,
    pub destination: String,
    pub distance_km: Option<f64>,
    pub waypoints: Vec<Waypoint>,
}

/// Actualización parcial de una ruta
#[derive(Debug, Clone, Default)]
pub struct RoutePatch {
    pub state: Option<RouteState>,
    pub distance_km: Option<f64>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

/// Campos para dar de alta un usuario
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: UserRole,
}

/// Campos para registrar una capacitación
#[derive(Debug, Clone)]
pub struct NewTraining {
    pub user_id: Uuid,
    pub topic: String,
    pub training_date: DateTime<Utc>,
    pub category: String,
    pub institution: Option<String>,
    pub certification: String,
    pub duration_hours: Option<i32>,
    pub score: Option<f64>,
    pub notes: Option<String>,
}

/// Actualización parcial de una capacitación
#[derive(Debug, Clone, Default)]
pub struct TrainingPatch {
    pub topic: Option<String>,
    pub training_date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub institution: Option<String>,
    pub certification: Option<String>,
    pub duration_hours: Option<i32>,
    pub score: Option<f64>,
    pub notes: Option<String>,
}

/// Filtros de búsqueda de capacitaciones
#[derive(Debug, Clone, Default)]
pub struct TrainingQuery {
    pub user_id: Option<Uuid>,
    pub category: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Falla con `Conflict` si la patente ya existe
    async fn create_vehicle(&self, new: NewVehicle) -> AppResult<Vehicle>;
    /// Falla con `NotFound` si el id no existe
    async fn get_vehicle(&self, id: Uuid) -> AppResult<Vehicle>;
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>>;
    async fn update_vehicle(&self, id: Uuid, patch: VehiclePatch) -> AppResult<Vehicle>;
    async fn delete_vehicle(&self, id: Uuid) -> AppResult<()>;
    /// Compare-and-set sobre `status`: aplica la transición solo si el estado
    /// actual es `from`. Devuelve si la escritura se aplicó.
    async fn set_vehicle_status_if(
        &self,
        id: Uuid,
        from: VehicleStatus,
        to: VehicleStatus,
    ) -> AppResult<bool>;
    /// Escritura incondicional de `status` (camino de liberación)
    async fn set_vehicle_status(&self, id: Uuid, to: VehicleStatus) -> AppResult<()>;
}

#[async_trait]
pub trait CargoStore: Send + Sync {
    async fn create_cargo(&self, new: NewCargo) -> AppResult<Cargo>;
    async fn get_cargo(&self, id: Uuid) -> AppResult<Cargo>;
    async fn list_cargos(&self) -> AppResult<Vec<Cargo>>;
    async fn update_cargo(&self, id: Uuid, patch: CargoPatch) -> AppResult<Cargo>;
    async fn delete_cargo(&self, id: Uuid) -> AppResult<()>;
    async fn set_cargo_status_if(
        &self,
        id: Uuid,
        from: CargoStatus,
        to: CargoStatus,
    ) -> AppResult<bool>;
    async fn set_cargo_status(&self, id: Uuid, to: CargoStatus) -> AppResult<()>;
}

#[async_trait]
pub trait RouteStore: Send + Sync {
    async fn create_route(&self, new: NewRoute) -> AppResult<Route>;
    async fn get_route(&self, id: Uuid) -> AppResult<Route>;
    async fn list_routes(&self, state: Option<RouteState>) -> AppResult<Vec<Route>>;
    async fn update_route(&self, id: Uuid, patch: RoutePatch) -> AppResult<Route>;
    async fn delete_route(&self, id: Uuid) -> AppResult<()>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Falla con `Conflict` si el email ya existe
    async fn create_user(&self, new: NewUser) -> AppResult<User>;
    async fn get_user(&self, id: Uuid) -> AppResult<User>;
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn list_users(&self) -> AppResult<Vec<User>>;
}

#[async_trait]
pub trait TrainingStore: Send + Sync {
    async fn create_training(&self, new: NewTraining) -> AppResult<TrainingRecord>;
    async fn get_training(&self, id: Uuid) -> AppResult<TrainingRecord>;
    async fn list_trainings(&self, query: TrainingQuery) -> AppResult<Vec<TrainingRecord>>;
    async fn update_training(&self, id: Uuid, patch: TrainingPatch) -> AppResult<TrainingRecord>;
    async fn delete_training(&self, id: Uuid) -> AppResult<()>;
}

/// Resource Store completo: los controllers lo reciben por inyección
/// explícita (`Arc<dyn ResourceStore>`), nunca como estado global.
pub trait ResourceStore:
    VehicleStore + CargoStore + RouteStore + UserStore + TrainingStore
{
}

impl<T> ResourceStore for T where
    T: VehicleStore + CargoStore + RouteStore + UserStore + TrainingStore
{
}
