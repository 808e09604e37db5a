//! Controller de cargas
//!
//! CRUD de envíos. `status` no se toca desde aquí: lo gobierna el
//! Route Lifecycle Manager.

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::dto::cargo_dto::{CargoResponse, CreateCargoRequest, UpdateCargoRequest};
use crate::repositories::store::{CargoPatch, CargoStore, NewCargo, ResourceStore, RouteStore};
use crate::utils::errors::{AppError, AppResult};

pub struct CargoController {
    store: Arc<dyn ResourceStore>,
}

impl CargoController {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, request: CreateCargoRequest) -> AppResult<CargoResponse> {
        request.validate()?;

        let cargo = self
            .store
            .create_cargo(NewCargo {
                description: request.description,
                weight_kg: request.weight_kg,
                category: request.category,
                priority: request.priority,
                origin: request.origin,
                destination: request.destination,
            })
            .await?;

        Ok(cargo.into())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<CargoResponse> {
        let cargo = self.store.get_cargo(id).await?;
        Ok(cargo.into())
    }

    pub async fn list(&self) -> AppResult<Vec<CargoResponse>> {
        let cargos = self.store.list_cargos().await?;
        Ok(cargos.into_iter().map(CargoResponse::from).collect())
    }

    pub async fn update(&self, id: Uuid, request: UpdateCargoRequest) -> AppResult<CargoResponse> {
        request.validate()?;

        let cargo = self
            .store
            .update_cargo(
                id,
                CargoPatch {
                    description: request.description,
                    weight_kg: request.weight_kg,
                    category: request.category,
                    priority: request.priority,
                    origin: request.origin,
                    destination: request.destination,
                },
            )
            .await?;

        Ok(cargo.into())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let cargo = self.store.get_cargo(id).await?;

        let routes = self.store.list_routes(None).await?;
        if routes
            .iter()
            .any(|r| r.cargo_id == cargo.id && r.state.is_active())
        {
            return Err(AppError::Conflict(format!(
                "cargo '{}' is referenced by an active route",
                id
            )));
        }

        self.store.delete_cargo(id).await
    }
}
