//! Route Lifecycle Manager
//!
//! Único componente autorizado a crear o transicionar rutas, y único
//! escritor de Vehicle.status / Cargo.status derivado de eventos de ruta.
//!
//! La reserva multi-entidad de `create` no cuenta con una transacción
//! nativa que cruce tablas, así que se arma con las transiciones
//! condicionales del store: se toma el vehículo, después la carga, y si
//! algún paso pierde la carrera se revierte lo tomado y se reintenta la
//! operación completa desde arriba, con un tope corto antes de responder
//! `Conflict`. Dos create concurrentes sobre el mismo vehículo o carga
//! nunca pueden tener éxito ambos.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::route_dto::{CreateRouteRequest, RouteResponse, UpdateRouteStateRequest};
use crate::models::cargo::CargoStatus;
use crate::models::route::{Route, RouteState};
use crate::models::user::UserRole;
use crate::models::vehicle::VehicleStatus;
use crate::repositories::store::{
    CargoStore, NewRoute, ResourceStore, RoutePatch, RouteStore, UserStore, VehicleStore,
};
use crate::utils::errors::{AppError, AppResult};

/// Reintentos de la reserva completa antes de rendirse con `Conflict`
const MAX_RESERVATION_ATTEMPTS: u32 = 3;

pub struct RouteController {
    store: Arc<dyn ResourceStore>,
}

impl RouteController {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    /// Crea una ruta reservando vehículo y carga como una unidad lógica.
    ///
    /// Precondiciones: vehículo `available`, carga `pending`, conductor con
    /// rol `driver`, y peso de la carga dentro de la capacidad del vehículo.
    /// Efecto: Route en `planned`, Vehicle en `en_route`, Cargo en `assigned`;
    /// si algo falla no queda ningún efecto parcial observable.
    pub async fn create(&self, request: CreateRouteRequest) -> AppResult<RouteResponse> {
        request.validate()?;

        for attempt in 0..MAX_RESERVATION_ATTEMPTS {
            let driver = self.store.get_user(request.driver_id).await?;
            if driver.role != UserRole::Driver {
                return Err(AppError::InvalidState(format!(
                    "user '{}' has role '{}', a route driver must have role 'driver'",
                    driver.id,
                    driver.role.as_str()
                )));
            }

            let vehicle = self.store.get_vehicle(request.vehicle_id).await?;
            if vehicle.status != VehicleStatus::Available {
                return Err(AppError::InvalidState(format!(
                    "vehicle '{}' is '{}', it must be 'available'",
                    vehicle.id,
                    vehicle.status.as_str()
                )));
            }

            let cargo = self.store.get_cargo(request.cargo_id).await?;
            if cargo.status != CargoStatus::Pending {
                return Err(AppError::InvalidState(format!(
                    "cargo '{}' is '{}', it must be 'pending'",
                    cargo.id,
                    cargo.status.as_str()
                )));
            }

            if cargo.weight_kg > vehicle.capacity_kg {
                return Err(AppError::CapacityExceeded {
                    weight_kg: cargo.weight_kg,
                    capacity_kg: vehicle.capacity_kg,
                });
            }

            // Reserva optimista: primero el vehículo, después la carga.
            let vehicle_taken = self
                .store
                .set_vehicle_status_if(vehicle.id, VehicleStatus::Available, VehicleStatus::EnRoute)
                .await?;
            if !vehicle_taken {
                info!(attempt, vehicle_id = %vehicle.id, "vehicle reservation lost, retrying");
                continue;
            }

            let cargo_taken = self
                .store
                .set_cargo_status_if(cargo.id, CargoStatus::Pending, CargoStatus::Assigned)
                .await?;
            if !cargo_taken {
                self.store
                    .set_vehicle_status(vehicle.id, VehicleStatus::Available)
                    .await?;
                info!(attempt, cargo_id = %cargo.id, "cargo reservation lost, retrying");
                continue;
            }

            match self
                .store
                .create_route(NewRoute {
                    vehicle_id: vehicle.id,
                    cargo_id: cargo.id,
                    driver_id: driver.id,
                    origin: request.origin.clone(),
                    destination: request.destination.clone(),
                    distance_km: request.distance_km,
                    waypoints: request.waypoints.clone(),
                })
                .await
            {
                Ok(route) => {
                    info!(route_id = %route.id, vehicle_id = %vehicle.id, cargo_id = %cargo.id,
                        "route created");
                    return Ok(route.into());
                }
                Err(e) => {
                    // Deshacer la reserva antes de propagar
                    self.store
                        .set_cargo_status(cargo.id, CargoStatus::Pending)
                        .await?;
                    self.store
                        .set_vehicle_status(vehicle.id, VehicleStatus::Available)
                        .await?;
                    return Err(e);
                }
            }
        }

        Err(AppError::Conflict(
            "could not reserve vehicle and cargo, another route creation won the race".to_string(),
        ))
    }

    /// Transiciona el estado de una ruta aplicando la tabla de la máquina
    /// de estados; toda arista no listada falla con `InvalidTransition` sin
    /// tocar ninguna entidad.
    pub async fn update_state(
        &self,
        route_id: Uuid,
        request: UpdateRouteStateRequest,
    ) -> AppResult<RouteResponse> {
        request.validate()?;

        let route = self.store.get_route(route_id).await?;
        if !route.state.can_transition_to(request.state) {
            return Err(AppError::InvalidTransition {
                from: route.state,
                to: request.state,
            });
        }

        match request.state {
            RouteState::InProgress => {
                let updated = self
                    .store
                    .update_route(
                        route_id,
                        RoutePatch {
                            state: Some(RouteState::InProgress),
                            distance_km: request.distance_km,
                            started_at: request.started_at,
                            ended_at: None,
                        },
                    )
                    .await?;
                info!(route_id = %route_id, "route started");
                Ok(updated.into())
            }

            RouteState::Cancelled => {
                // La cancelación siempre libera ambos recursos, sin importar
                // en qué estado nominal estuvieran. Se liberan primero: si la
                // escritura de la ruta fallara, un reintento de cancelación
                // vuelve a pasar por aquí sin efectos duplicados.
                self.release_resources(&route).await?;
                let updated = self
                    .store
                    .update_route(
                        route_id,
                        RoutePatch {
                            state: Some(RouteState::Cancelled),
                            distance_km: request.distance_km,
                            started_at: request.started_at,
                            ended_at: request.ended_at.or_else(|| Some(Utc::now())),
                        },
                    )
                    .await?;
                info!(route_id = %route_id, "route cancelled, vehicle and cargo released");
                Ok(updated.into())
            }

            RouteState::Completed => {
                self.store
                    .set_cargo_status(route.cargo_id, CargoStatus::Delivered)
                    .await?;
                self.store
                    .set_vehicle_status(route.vehicle_id, VehicleStatus::Available)
                    .await?;
                let updated = self
                    .store
                    .update_route(
                        route_id,
                        RoutePatch {
                            state: Some(RouteState::Completed),
                            distance_km: request.distance_km,
                            started_at: request.started_at,
                            ended_at: request.ended_at.or_else(|| Some(Utc::now())),
                        },
                    )
                    .await?;
                info!(route_id = %route_id, "route completed, cargo delivered");
                Ok(updated.into())
            }

            // Planned solo es estado inicial; can_transition_to ya lo rechazó
            RouteState::Planned => unreachable!("planned is never a transition target"),
        }
    }

    /// Elimina una ruta. Las rutas terminales se eliminan sin más; una ruta
    /// activa requiere `force` y libera vehículo y carga exactamente como la
    /// cancelación, para no dejarlos reservados sin ruta que los referencie.
    pub async fn delete(&self, route_id: Uuid, force: bool) -> AppResult<()> {
        let route = self.store.get_route(route_id).await?;

        if route.state.is_active() {
            if !force {
                return Err(AppError::InvalidState(format!(
                    "route '{}' is '{}'; only completed or cancelled routes can be deleted \
                     (use force to release and delete an active route)",
                    route.id,
                    route.state.as_str()
                )));
            }
            self.release_resources(&route).await?;
            info!(route_id = %route_id, "active route force-deleted, resources released");
        }

        self.store.delete_route(route_id).await
    }

    pub async fn get(&self, route_id: Uuid) -> AppResult<RouteResponse> {
        let route = self.store.get_route(route_id).await?;
        Ok(route.into())
    }

    pub async fn list(&self, state: Option<RouteState>) -> AppResult<Vec<RouteResponse>> {
        let routes = self.store.list_routes(state).await?;
        Ok(routes.into_iter().map(RouteResponse::from).collect())
    }

    /// Liberación: carga a `pending`, vehículo a `available`, incondicional
    async fn release_resources(&self, route: &Route) -> AppResult<()> {
        self.store
            .set_cargo_status(route.cargo_id, CargoStatus::Pending)
            .await?;
        self.store
            .set_vehicle_status(route.vehicle_id, VehicleStatus::Available)
            .await?;
        Ok(())
    }
}
