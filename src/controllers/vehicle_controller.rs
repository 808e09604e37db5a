//! Controller de vehículos
//!
//! CRUD de la flota. El estado `en_route` solo lo pone y lo quita el
//! Route Lifecycle Manager; acá se rechaza cualquier intento de forzarlo
//! a mano y se protege la eliminación de un vehículo reservado.

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::models::vehicle::VehicleStatus;
use crate::repositories::store::{
    NewVehicle, ResourceStore, RouteStore, VehiclePatch, VehicleStore,
};
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleController {
    store: Arc<dyn ResourceStore>,
}

impl VehicleController {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<VehicleResponse> {
        request.validate()?;

        let vehicle = self
            .store
            .create_vehicle(NewVehicle {
                plate: request.plate,
                make: request.make,
                model: request.model,
                capacity_kg: request.capacity_kg,
                position_lat: request.position_lat,
                position_lng: request.position_lng,
            })
            .await?;

        Ok(vehicle.into())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<VehicleResponse> {
        let vehicle = self.store.get_vehicle(id).await?;
        Ok(vehicle.into())
    }

    pub async fn list(&self) -> AppResult<Vec<VehicleResponse>> {
        let vehicles = self.store.list_vehicles().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> AppResult<VehicleResponse> {
        request.validate()?;

        // en_route lo administra exclusivamente el ciclo de vida de rutas
        if request.status == Some(VehicleStatus::EnRoute) {
            return Err(AppError::InvalidState(
                "vehicle status 'en_route' is managed by the route lifecycle".to_string(),
            ));
        }
        if request.status.is_some() {
            let current = self.store.get_vehicle(id).await?;
            if current.status == VehicleStatus::EnRoute {
                return Err(AppError::InvalidState(format!(
                    "vehicle '{}' is reserved by an active route",
                    id
                )));
            }
        }

        let vehicle = self
            .store
            .update_vehicle(
                id,
                VehiclePatch {
                    plate: request.plate,
                    make: request.make,
                    model: request.model,
                    capacity_kg: request.capacity_kg,
                    status: request.status,
                    position_lat: request.position_lat,
                    position_lng: request.position_lng,
                },
            )
            .await?;

        Ok(vehicle.into())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let vehicle = self.store.get_vehicle(id).await?;

        // La eliminación de rutas dependientes es responsabilidad del caller,
        // nunca automática: con una ruta activa referenciando al vehículo la
        // eliminación se rechaza.
        let routes = self.store.list_routes(None).await?;
        if routes
            .iter()
            .any(|r| r.vehicle_id == vehicle.id && r.state.is_active())
        {
            return Err(AppError::Conflict(format!(
                "vehicle '{}' is referenced by an active route",
                id
            )));
        }

        self.store.delete_vehicle(id).await
    }
}
