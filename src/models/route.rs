//! Modelo de Route y su máquina de estados
//!
//! Una ruta asigna un vehículo y un conductor al transporte de una carga.
//! La ruta es dueña de sus waypoints; al vehículo y a la carga solo los
//! referencia: cancelar o eliminar una ruta nunca los elimina, solo
//! revierte su estado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use uuid::Uuid;

/// Estado de la ruta - mapea al ENUM route_state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "route_state", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RouteState {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl RouteState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteState::Planned => "planned",
            RouteState::InProgress => "in_progress",
            RouteState::Completed => "completed",
            RouteState::Cancelled => "cancelled",
        }
    }

    /// Estados terminales: no admiten ninguna transición posterior
    pub fn is_terminal(&self) -> bool {
        matches!(self, RouteState::Completed | RouteState::Cancelled)
    }

    /// Una ruta activa es la que mantiene reservados vehículo y carga
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Tabla de transiciones legales; todo lo demás está prohibido,
    /// incluidas las auto-transiciones.
    pub fn can_transition_to(&self, next: RouteState) -> bool {
        matches!(
            (self, next),
            (RouteState::Planned, RouteState::InProgress)
                | (RouteState::Planned, RouteState::Cancelled)
                | (RouteState::InProgress, RouteState::Completed)
                | (RouteState::InProgress, RouteState::Cancelled)
        )
    }
}

/// Punto intermedio de la ruta
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lng: f64,
}

/// Route principal - mapea a la tabla routes (waypoints como JSONB)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert!(RouteState::Planned.can_transition_to(RouteState::InProgress));
        assert!(RouteState::Planned.can_transition_to(RouteState::Cancelled));
        assert!(RouteState::InProgress.can_transition_to(RouteState::Completed));
        assert!(RouteState::InProgress.can_transition_to(RouteState::Cancelled));
    }

    #[test]
    fn test_forbidden_transitions() {
        // saltos y retrocesos
        assert!(!RouteState::Planned.can_transition_to(RouteState::Completed));
        assert!(!RouteState::InProgress.can_transition_to(RouteState::Planned));
        // auto-transiciones
        assert!(!RouteState::Planned.can_transition_to(RouteState::Planned));
        assert!(!RouteState::InProgress.can_transition_to(RouteState::InProgress));
        // los estados terminales no admiten salidas
        for next in [
            RouteState::Planned,
            RouteState::InProgress,
            RouteState::Completed,
            RouteState::Cancelled,
        ] {
            assert!(!RouteState::Completed.can_transition_to(next));
            assert!(!RouteState::Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(RouteState::Completed.is_terminal());
        assert!(RouteState::Cancelled.is_terminal());
        assert!(RouteState::Planned.is_active());
        assert!(RouteState::InProgress.is_active());
    }
}
