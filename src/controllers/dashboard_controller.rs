//! Controller del dashboard
//!
//! Consultas de solo lectura sobre datos ya persistidos; sin efectos.

use std::sync::Arc;

use crate::dto::dashboard_dto::{ActiveRouteSummary, DashboardStats};
use crate::models::cargo::CargoStatus;
use crate::models::route::RouteState;
use crate::models::vehicle::VehicleStatus;
use crate::repositories::store::{
    CargoStore, ResourceStore, RouteStore, UserStore, VehicleStore,
};
use crate::utils::errors::AppResult;

const DEFAULT_ACTIVE_ROUTES_LIMIT: usize = 10;

pub struct DashboardController {
    store: Arc<dyn ResourceStore>,
}

impl DashboardController {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let routes = self.store.list_routes(None).await?;
        let cargos = self.store.list_cargos().await?;
        let vehicles = self.store.list_vehicles().await?;

        Ok(DashboardStats {
            total_routes: routes.len(),
            active_routes: routes.iter().filter(|r| r.state.is_active()).count(),
            completed_routes: routes
                .iter()
                .filter(|r| r.state == RouteState::Completed)
                .count(),
            cancelled_routes: routes
                .iter()
                .filter(|r| r.state == RouteState::Cancelled)
                .count(),
            total_cargos: cargos.len(),
            pending_cargos: cargos
                .iter()
                .filter(|c| c.status == CargoStatus::Pending)
                .count(),
            delivered_cargos: cargos
                .iter()
                .filter(|c| c.status == CargoStatus::Delivered)
                .count(),
            total_vehicles: vehicles.len(),
            available_vehicles: vehicles
                .iter()
                .filter(|v| v.status == VehicleStatus::Available)
                .count(),
            en_route_vehicles: vehicles
                .iter()
                .filter(|v| v.status == VehicleStatus::EnRoute)
                .count(),
            maintenance_vehicles: vehicles
                .iter()
                .filter(|v| v.status == VehicleStatus::Maintenance)
                .count(),
        })
    }

    /// Rutas activas con vehículo, carga y conductor incrustados
    pub async fn active_routes(&self, limit: Option<usize>) -> AppResult<Vec<ActiveRouteSummary>> {
        let limit = limit.unwrap_or(DEFAULT_ACTIVE_ROUTES_LIMIT);

        let mut routes = self.store.list_routes(None).await?;
        routes.retain(|r| r.state.is_active());
        routes.truncate(limit);

        let mut summaries = Vec::with_capacity(routes.len());
        for route in routes {
            let vehicle = self.store.get_vehicle(route.vehicle_id).await?;
            let cargo = self.store.get_cargo(route.cargo_id).await?;
            let driver = self.store.get_user(route.driver_id).await?;
            summaries.push(ActiveRouteSummary {
                route: route.into(),
                vehicle: vehicle.into(),
                cargo: cargo.into(),
                driver: driver.into(),
            });
        }

        Ok(summaries)
    }
}
