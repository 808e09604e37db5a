//! DTOs de Route

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::route::{Route, RouteState, Waypoint};

/// Request para crear una ruta
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRouteRequest {
    pub vehicle_id: Uuid,
    pub cargo_id: Uuid,
    pub driver_id: Uuid,

    #[validate(length(min = 2, max = 255))]
    pub origin: String,

    #[validate(length(min = 2, max = 255))]
    pub destination: String,

    #[validate(range(min = 0.0))]
    pub distance_km: Option<f64>,

    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

/// Request para transicionar el estado de una ruta
///
/// `distance_km`, `started_at` y `ended_at` solo se aplican si vienen
/// informados.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRouteStateRequest {
    pub state: RouteState,

    #[validate(range(min = 0.0))]
    pub distance_km: Option<f64>,

    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

/// Filtro de listado de rutas
#[derive(Debug, Default, Deserialize)]
pub struct RouteFilters {
    pub state: Option<RouteState>,
}

/// Query params de DELETE /api/routes/:id
#[derive(Debug, Default, Deserialize)]
pub struct DeleteRouteParams {
    /// Permite eliminar una ruta activa, liberando vehículo y carga primero
    #[serde(default)]
    pub force: bool,
}

/// Response de ruta para la API
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub cargo_id: Uuid,
    pub driver_id: Uuid,
    pub origin: String,
    pub destination: String,
    pub distance_km: Option<f64>,
    pub state: RouteState,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub waypoints: Vec<Waypoint>,
    pub created_at: DateTime<Utc>,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            id: route.id,
            vehicle_id: route.vehicle_id,
            cargo_id: route.cargo_id,
            driver_id: route.driver_id,
            origin: route.origin,
            destination: route.destination,
            distance_km: route.distance_km,
            state: route.state,
            started_at: route.started_at,
            ended_at: route.ended_at,
            waypoints: route.waypoints,
            created_at: route.created_at,
        }
    }
}
