//! DTOs del dashboard

use serde::{Deserialize, Serialize};

use crate::dto::auth_dto::UserResponse;
use crate::dto::cargo_dto::CargoResponse;
use crate::dto::route_dto::RouteResponse;
use crate::dto::vehicle_dto::VehicleResponse;

/// Estadísticas agregadas del sistema
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_routes: usize,
    pub active_routes: usize,
    pub completed_routes: usize,
    pub cancelled_routes: usize,
    pub total_cargos: usize,
    pub pending_cargos: usize,
    pub delivered_cargos: usize,
    pub total_vehicles: usize,
    pub available_vehicles: usize,
    pub en_route_vehicles: usize,
    pub maintenance_vehicles: usize,
}

/// Query params de /api/dashboard/active-routes
#[derive(Debug, Deserialize)]
pub struct ActiveRoutesParams {
    pub limit: Option<usize>,
}

/// Ruta activa con sus entidades vinculadas, para el tablero
#[derive(Debug, Serialize)]
pub struct ActiveRouteSummary {
    #[serde(flatten)]
    pub route: RouteResponse,
    pub vehicle: VehicleResponse,
    pub cargo: CargoResponse,
    pub driver: UserResponse,
}
