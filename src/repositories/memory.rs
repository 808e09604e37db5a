//! Resource Store en memoria
//!
//! Implementación sobre `tokio::sync::RwLock`, con la misma semántica que el
//! backend Postgres: escrituras atómicas por entidad y compare-and-set sobre
//! `status` dentro de una única sección crítica. La usan los tests de
//! integración y el modo local sin base de datos.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::cargo::{Cargo, CargoStatus};
use crate::models::route::{Route, RouteState};
use crate::models::training::TrainingRecord;
use crate::models::user::User;
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::store::{
    CargoPatch, CargoStore, NewCargo, NewRoute, NewTraining, NewUser, NewVehicle, RoutePatch,
    RouteStore, TrainingPatch, TrainingQuery, TrainingStore, UserStore, VehiclePatch,
    VehicleStore,
};
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

#[derive(Default)]
struct Tables {
    vehicles: HashMap<Uuid, Vehicle>,
    cargos: HashMap<Uuid, Cargo>,
    routes: HashMap<Uuid, Route>,
    users: HashMap<Uuid, User>,
    trainings: HashMap<Uuid, TrainingRecord>,
}

#[derive(Default)]
pub struct MemoryResourceStore {
    inner: RwLock<Tables>,
}

impl MemoryResourceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleStore for MemoryResourceStore {
    async fn create_vehicle(&self, new: NewVehicle) -> AppResult<Vehicle> {
        let mut tables = self.inner.write().await;
        if tables.vehicles.values().any(|v| v.plate == new.plate) {
            return Err(conflict_error("Vehicle", "plate", &new.plate));
        }
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            plate: new.plate,
            make: new.make,
            model: new.model,
            capacity_kg: new.capacity_kg,
            status: VehicleStatus::Available,
            position_lat: new.position_lat,
            position_lng: new.position_lng,
            created_at: Utc::now(),
        };
        tables.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn get_vehicle(&self, id: Uuid) -> AppResult<Vehicle> {
        self.inner
            .read()
            .await
            .vehicles
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let tables = self.inner.read().await;
        let mut vehicles: Vec<Vehicle> = tables.vehicles.values().cloned().collect();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(vehicles)
    }

    async fn update_vehicle(&self, id: Uuid, patch: VehiclePatch) -> AppResult<Vehicle> {
        let mut tables = self.inner.write().await;
        if let Some(ref plate) = patch.plate {
            if tables
                .vehicles
                .values()
                .any(|v| v.id != id && v.plate == *plate)
            {
                return Err(conflict_error("Vehicle", "plate", plate));
            }
        }
        let vehicle = tables
            .vehicles
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Vehicle", id))?;
        if let Some(plate) = patch.plate {
            vehicle.plate = plate;
        }
        if let Some(make) = patch.make {
            vehicle.make = make;
        }
        if let Some(model) = patch.model {
            vehicle.model = model;
        }
        if let Some(capacity_kg) = patch.capacity_kg {
            vehicle.capacity_kg = capacity_kg;
        }
        if let Some(status) = patch.status {
            vehicle.status = status;
        }
        if let Some(lat) = patch.position_lat {
            vehicle.position_lat = Some(lat);
        }
        if let Some(lng) = patch.position_lng {
            vehicle.position_lng = Some(lng);
        }
        Ok(vehicle.clone())
    }

    async fn delete_vehicle(&self, id: Uuid) -> AppResult<()> {
        self.inner
            .write()
            .await
            .vehicles
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    async fn set_vehicle_status_if(
        &self,
        id: Uuid,
        from: VehicleStatus,
        to: VehicleStatus,
    ) -> AppResult<bool> {
        let mut tables = self.inner.write().await;
        match tables.vehicles.get_mut(&id) {
            Some(vehicle) if vehicle.status == from => {
                vehicle.status = to;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn set_vehicle_status(&self, id: Uuid, to: VehicleStatus) -> AppResult<()> {
        let mut tables = self.inner.write().await;
        let vehicle = tables
            .vehicles
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Vehicle", id))?;
        vehicle.status = to;
        Ok(())
    }
}

#[async_trait]
impl CargoStore for MemoryResourceStore {
    async fn create_cargo(&self, new: NewCargo) -> AppResult<Cargo> {
        let cargo = Cargo {
            id: Uuid::new_v4(),
            description: new.description,
            weight_kg: new.weight_kg,
            category: new.category,
            priority: new.priority,
            status: CargoStatus::Pending,
            origin: new.origin,
            destination: new.destination,
            created_at: Utc::now(),
        };
        self.inner
            .write()
            .await
            .cargos
            .insert(cargo.id, cargo.clone());
        Ok(cargo)
    }

    async fn get_cargo(&self, id: Uuid) -> AppResult<Cargo> {
        self.inner
            .read()
            .await
            .cargos
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found_error("Cargo", id))
    }

    async fn list_cargos(&self) -> AppResult<Vec<Cargo>> {
        let tables = self.inner.read().await;
        let mut cargos: Vec<Cargo> = tables.cargos.values().cloned().collect();
        cargos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(cargos)
    }

    async fn update_cargo(&self, id: Uuid, patch: CargoPatch) -> AppResult<Cargo> {
        let mut tables = self.inner.write().await;
        let cargo = tables
            .cargos
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Cargo", id))?;
        if let Some(description) = patch.description {
            cargo.description = description;
        }
        if let Some(weight_kg) = patch.weight_kg {
            cargo.weight_kg = weight_kg;
        }
        if let Some(category) = patch.category {
            cargo.category = category;
        }
        if let Some(priority) = patch.priority {
            cargo.priority = priority;
        }
        if let Some(origin) = patch.origin {
            cargo.origin = origin;
        }
        if let Some(destination) = patch.destination {
            cargo.destination = destination;
        }
        Ok(cargo.clone())
    }

    async fn delete_cargo(&self, id: Uuid) -> AppResult<()> {
        self.inner
            .write()
            .await
            .cargos
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found_error("Cargo", id))
    }

    async fn set_cargo_status_if(
        &self,
        id: Uuid,
        from: CargoStatus,
        to: CargoStatus,
    ) -> AppResult<bool> {
        let mut tables = self.inner.write().await;
        match tables.cargos.get_mut(&id) {
            Some(cargo) if cargo.status == from => {
                cargo.status = to;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn set_cargo_status(&self, id: Uuid, to: CargoStatus) -> AppResult<()> {
        let mut tables = self.inner.write().await;
        let cargo = tables
            .cargos
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Cargo", id))?;
        cargo.status = to;
        Ok(())
    }
}

#[async_trait]
impl RouteStore for MemoryResourceStore {
    async fn create_route(&self, new: NewRoute) -> AppResult<Route> {
        let route = Route {
            id: Uuid::new_v4(),
            vehicle_id: new.vehicle_id,
            cargo_id: new.cargo_id,
            driver_id: new.driver_id,
            origin: new.origin,
            destination: new.destination,
            distance_km: new.distance_km,
            state: RouteState::Planned,
            started_at: None,
            ended_at: None,
            waypoints: new.waypoints,
            created_at: Utc::now(),
        };
        self.inner
            .write()
            .await
            .routes
            .insert(route.id, route.clone());
        Ok(route)
    }

    async fn get_route(&self, id: Uuid) -> AppResult<Route> {
        self.inner
            .read()
            .await
            .routes
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found_error("Route", id))
    }

    async fn list_routes(&self, state: Option<RouteState>) -> AppResult<Vec<Route>> {
        let tables = self.inner.read().await;
        let mut routes: Vec<Route> = tables
            .routes
            .values()
            .filter(|r| state.map_or(true, |s| r.state == s))
            .cloned()
            .collect();
        routes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(routes)
    }

    async fn update_route(&self, id: Uuid, patch: RoutePatch) -> AppResult<Route> {
        let mut tables = self.inner.write().await;
        let route = tables
            .routes
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Route", id))?;
        if let Some(state) = patch.state {
            route.state = state;
        }
        if let Some(distance_km) = patch.distance_km {
            route.distance_km = Some(distance_km);
        }
        if let Some(started_at) = patch.started_at {
            route.started_at = Some(started_at);
        }
        if let Some(ended_at) = patch.ended_at {
            route.ended_at = Some(ended_at);
        }
        Ok(route.clone())
    }

    async fn delete_route(&self, id: Uuid) -> AppResult<()> {
        self.inner
            .write()
            .await
            .routes
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found_error("Route", id))
    }
}

#[async_trait]
impl UserStore for MemoryResourceStore {
    async fn create_user(&self, new: NewUser) -> AppResult<User> {
        let mut tables = self.inner.write().await;
        if tables.users.values().any(|u| u.email == new.email) {
            return Err(conflict_error("User", "email", &new.email));
        }
        let user = User {
            id: Uuid::new_v4(),
            email: new.email,
            password_hash: new.password_hash,
            full_name: new.full_name,
            role: new.role,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.inner
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found_error("User", id))
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let tables = self.inner.read().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(users)
    }
}

#[async_trait]
impl TrainingStore for MemoryResourceStore {
    async fn create_training(&self, new: NewTraining) -> AppResult<TrainingRecord> {
        let record = TrainingRecord {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            topic: new.topic,
            training_date: new.training_date,
            category: new.category,
            institution: new.institution,
            certification: new.certification,
            duration_hours: new.duration_hours,
            score: new.score,
            notes: new.notes,
            created_at: Utc::now(),
        };
        self.inner
            .write()
            .await
            .trainings
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_training(&self, id: Uuid) -> AppResult<TrainingRecord> {
        self.inner
            .read()
            .await
            .trainings
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found_error("Training record", id))
    }

    async fn list_trainings(&self, query: TrainingQuery) -> AppResult<Vec<TrainingRecord>> {
        let tables = self.inner.read().await;
        let mut records: Vec<TrainingRecord> = tables
            .trainings
            .values()
            .filter(|t| query.user_id.map_or(true, |id| t.user_id == id))
            .filter(|t| {
                query
                    .category
                    .as_deref()
                    .map_or(true, |c| t.category == c)
            })
            .filter(|t| query.from.map_or(true, |from| t.training_date >= from))
            .filter(|t| query.to.map_or(true, |to| t.training_date <= to))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.training_date.cmp(&a.training_date));
        Ok(records)
    }

    async fn update_training(&self, id: Uuid, patch: TrainingPatch) -> AppResult<TrainingRecord> {
        let mut tables = self.inner.write().await;
        let record = tables
            .trainings
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Training record", id))?;
        if let Some(topic) = patch.topic {
            record.topic = topic;
        }
        if let Some(training_date) = patch.training_date {
            record.training_date = training_date;
        }
        if let Some(category) = patch.category {
            record.category = category;
        }
        if let Some(institution) = patch.institution {
            record.institution = Some(institution);
        }
        if let Some(certification) = patch.certification {
            record.certification = certification;
        }
        if let Some(duration_hours) = patch.duration_hours {
            record.duration_hours = Some(duration_hours);
        }
        if let Some(score) = patch.score {
            record.score = Some(score);
        }
        if let Some(notes) = patch.notes {
            record.notes = Some(notes);
        }
        Ok(record.clone())
    }

    async fn delete_training(&self, id: Uuid) -> AppResult<()> {
        self.inner
            .write()
            .await
            .trainings
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found_error("Training record", id))
    }
}
