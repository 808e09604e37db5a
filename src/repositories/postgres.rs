//! Resource Store sobre PostgreSQL
//!
//! Implementación sqlx del contrato de `store`. Las transiciones
//! condicionales de estado se apoyan en un único
//! `UPDATE ... WHERE status = $from`, que Postgres ejecuta de forma atómica
//! por fila; eso es todo lo que el Route Lifecycle Manager necesita para su
//! estrategia optimista.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::cargo::{Cargo, CargoStatus};
use crate::models::route::{Route, RouteState, Waypoint};
use crate::models::training::TrainingRecord;
use crate::models::user::User;
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::store::{
    CargoPatch, CargoStore, NewCargo, NewRoute, NewTraining, NewUser, NewVehicle, RoutePatch,
    RouteStore, TrainingPatch, TrainingQuery, TrainingStore, UserStore, VehiclePatch,
    VehicleStore,
};
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};

#[derive(Clone)]
pub struct PgResourceStore {
    pool: PgPool,
}

impl PgResourceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Traduce la violación de unicidad de Postgres (23505) a `Conflict`
fn map_unique_violation(err: sqlx::Error, conflict: AppError) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => conflict,
        _ => AppError::Database(err),
    }
}

/// Fila de routes; los waypoints viajan como JSONB
#[derive(sqlx::FromRow)]
struct RouteRow {
    id: Uuid,
    vehicle_id: Uuid,
    cargo_id: Uuid,
    driver_id: Uuid,
    origin: String,
    destination: String,
    distance_km: Option<f64>,
    state: RouteState,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    waypoints: Json<Vec<Waypoint>>,
    created_at: DateTime<Utc>,
}

impl From<RouteRow> for Route {
    fn from(row: RouteRow) -> Self {
        Route {
            id: row.id,
            vehicle_id: row.vehicle_id,
            cargo_id: row.cargo_id,
            driver_id: row.driver_id,
            origin: row.origin,
            destination: row.destination,
            distance_km: row.distance_km,
            state: row.state,
            started_at: row.started_at,
            ended_at: row.ended_at,
            waypoints: row.waypoints.0,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl VehicleStore for PgResourceStore {
    async fn create_vehicle(&self, new: NewVehicle) -> AppResult<Vehicle> {
        let plate = new.plate.clone();
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, plate, make, model, capacity_kg, status, position_lat, position_lng, created_at)
            VALUES ($1, $2, $3, $4, $5, 'available', $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.plate)
        .bind(new.make)
        .bind(new.model)
        .bind(new.capacity_kg)
        .bind(new.position_lat)
        .bind(new.position_lng)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, conflict_error("Vehicle", "plate", &plate)))?;

        Ok(vehicle)
    }

    async fn get_vehicle(&self, id: Uuid) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(vehicles)
    }

    async fn update_vehicle(&self, id: Uuid, patch: VehiclePatch) -> AppResult<Vehicle> {
        let current = self.get_vehicle(id).await?;
        let plate = patch.plate.unwrap_or(current.plate);

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET plate = $2, make = $3, model = $4, capacity_kg = $5, status = $6,
                position_lat = $7, position_lng = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(plate.clone())
        .bind(patch.make.unwrap_or(current.make))
        .bind(patch.model.unwrap_or(current.model))
        .bind(patch.capacity_kg.unwrap_or(current.capacity_kg))
        .bind(patch.status.unwrap_or(current.status))
        .bind(patch.position_lat.or(current.position_lat))
        .bind(patch.position_lng.or(current.position_lng))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, conflict_error("Vehicle", "plate", &plate)))?;

        Ok(vehicle)
    }

    async fn delete_vehicle(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found_error("Vehicle", id));
        }
        Ok(())
    }

    async fn set_vehicle_status_if(
        &self,
        id: Uuid,
        from: VehicleStatus,
        to: VehicleStatus,
    ) -> AppResult<bool> {
        let result = sqlx::query("UPDATE vehicles SET status = $3 WHERE id = $1 AND status = $2")
            .bind(id)
            .bind(from)
            .bind(to)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn set_vehicle_status(&self, id: Uuid, to: VehicleStatus) -> AppResult<()> {
        let result = sqlx::query("UPDATE vehicles SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(to)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found_error("Vehicle", id));
        }
        Ok(())
    }
}

#[async_trait]
impl CargoStore for PgResourceStore {
    async fn create_cargo(&self, new: NewCargo) -> AppResult<Cargo> {
        let cargo = sqlx::query_as::<_, Cargo>(
            r#"
            INSERT INTO cargos (id, description, weight_kg, category, priority, status, origin, destination, created_at)
            VALUES ($1, $2, $3, $4, $5, 'pending', $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.description)
        .bind(new.weight_kg)
        .bind(new.category)
        .bind(new.priority)
        .bind(new.origin)
        .bind(new.destination)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(cargo)
    }

    async fn get_cargo(&self, id: Uuid) -> AppResult<Cargo> {
        sqlx::query_as::<_, Cargo>("SELECT * FROM cargos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found_error("Cargo", id))
    }

    async fn list_cargos(&self) -> AppResult<Vec<Cargo>> {
        let cargos = sqlx::query_as::<_, Cargo>("SELECT * FROM cargos ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(cargos)
    }

    async fn update_cargo(&self, id: Uuid, patch: CargoPatch) -> AppResult<Cargo> {
        let current = self.get_cargo(id).await?;

        let cargo = sqlx::query_as::<_, Cargo>(
            r#"
            UPDATE cargos
            SET description = $2, weight_kg = $3, category = $4, priority = $5,
                origin = $6, destination = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.description.unwrap_or(current.description))
        .bind(patch.weight_kg.unwrap_or(current.weight_kg))
        .bind(patch.category.unwrap_or(current.category))
        .bind(patch.priority.unwrap_or(current.priority))
        .bind(patch.origin.unwrap_or(current.origin))
        .bind(patch.destination.unwrap_or(current.destination))
        .fetch_one(&self.pool)
        .await?;

        Ok(cargo)
    }

    async fn delete_cargo(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM cargos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found_error("Cargo", id));
        }
        Ok(())
    }

    async fn set_cargo_status_if(
        &self,
        id: Uuid,
        from: CargoStatus,
        to: CargoStatus,
    ) -> AppResult<bool> {
        let result = sqlx::query("UPDATE cargos SET status = $3 WHERE id = $1 AND status = $2")
            .bind(id)
            .bind(from)
            .bind(to)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn set_cargo_status(&self, id: Uuid, to: CargoStatus) -> AppResult<()> {
        let result = sqlx::query("UPDATE cargos SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(to)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found_error("Cargo", id));
        }
        Ok(())
    }
}

#[async_trait]
impl RouteStore for PgResourceStore {
    async fn create_route(&self, new: NewRoute) -> AppResult<Route> {
        let row = sqlx::query_as::<_, RouteRow>(
            r#"
            INSERT INTO routes (id, vehicle_id, cargo_id, driver_id, origin, destination,
                                distance_km, state, waypoints, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'planned', $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.vehicle_id)
        .bind(new.cargo_id)
        .bind(new.driver_id)
        .bind(new.origin)
        .bind(new.destination)
        .bind(new.distance_km)
        .bind(Json(new.waypoints))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get_route(&self, id: Uuid) -> AppResult<Route> {
        sqlx::query_as::<_, RouteRow>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Route::from)
            .ok_or_else(|| not_found_error("Route", id))
    }

    async fn list_routes(&self, state: Option<RouteState>) -> AppResult<Vec<Route>> {
        let rows = match state {
            Some(state) => {
                sqlx::query_as::<_, RouteRow>(
                    "SELECT * FROM routes WHERE state = $1 ORDER BY created_at DESC",
                )
                .bind(state)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, RouteRow>("SELECT * FROM routes ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.into_iter().map(Route::from).collect())
    }

    async fn update_route(&self, id: Uuid, patch: RoutePatch) -> AppResult<Route> {
        let current = self.get_route(id).await?;

        let row = sqlx::query_as::<_, RouteRow>(
            r#"
            UPDATE routes
            SET state = $2, distance_km = $3, started_at = $4, ended_at = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.state.unwrap_or(current.state))
        .bind(patch.distance_km.or(current.distance_km))
        .bind(patch.started_at.or(current.started_at))
        .bind(patch.ended_at.or(current.ended_at))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn delete_route(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found_error("Route", id));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgResourceStore {
    async fn create_user(&self, new: NewUser) -> AppResult<User> {
        let email = new.email.clone();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, full_name, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.full_name)
        .bind(new.role)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, conflict_error("User", "email", &email)))?;

        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found_error("User", id))
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY full_name")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }
}

#[async_trait]
impl TrainingStore for PgResourceStore {
    async fn create_training(&self, new: NewTraining) -> AppResult<TrainingRecord> {
        let record = sqlx::query_as::<_, TrainingRecord>(
            r#"
            INSERT INTO training_records (id, user_id, topic, training_date, category,
                                          institution, certification, duration_hours, score, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.topic)
        .bind(new.training_date)
        .bind(new.category)
        .bind(new.institution)
        .bind(new.certification)
        .bind(new.duration_hours)
        .bind(new.score)
        .bind(new.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn get_training(&self, id: Uuid) -> AppResult<TrainingRecord> {
        sqlx::query_as::<_, TrainingRecord>("SELECT * FROM training_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found_error("Training record", id))
    }

    async fn list_trainings(&self, query: TrainingQuery) -> AppResult<Vec<TrainingRecord>> {
        let records = sqlx::query_as::<_, TrainingRecord>(
            r#"
            SELECT * FROM training_records
            WHERE ($1::uuid IS NULL OR user_id = $1)
              AND ($2::text IS NULL OR category = $2)
              AND ($3::timestamptz IS NULL OR training_date >= $3)
              AND ($4::timestamptz IS NULL OR training_date <= $4)
            ORDER BY training_date DESC
            "#,
        )
        .bind(query.user_id)
        .bind(query.category)
        .bind(query.from)
        .bind(query.to)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn update_training(&self, id: Uuid, patch: TrainingPatch) -> AppResult<TrainingRecord> {
        let current = self.get_training(id).await?;

        let record = sqlx::query_as::<_, TrainingRecord>(
            r#"
            UPDATE training_records
            SET topic = $2, training_date = $3, category = $4, institution = $5,
                certification = $6, duration_hours = $7, score = $8, notes = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.topic.unwrap_or(current.topic))
        .bind(patch.training_date.unwrap_or(current.training_date))
        .bind(patch.category.unwrap_or(current.category))
        .bind(patch.institution.or(current.institution))
        .bind(patch.certification.unwrap_or(current.certification))
        .bind(patch.duration_hours.or(current.duration_hours))
        .bind(patch.score.or(current.score))
        .bind(patch.notes.or(current.notes))
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn delete_training(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM training_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found_error("Training record", id));
        }
        Ok(())
    }
}
