//! Modelo de User
//!
//! Los roles del sistema gobiernan el Access Policy Gate; el rol `Driver`
//! además es requisito para figurar como conductor de una ruta.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Roles del sistema - mapea al ENUM user_role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Logistics,
    Hr,
    Security,
    Driver,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Logistics => "logistics",
            UserRole::Hr => "hr",
            UserRole::Security => "security",
            UserRole::Driver => "driver",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "logistics" => Some(UserRole::Logistics),
            "hr" => Some(UserRole::Hr),
            "security" => Some(UserRole::Security),
            "driver" => Some(UserRole::Driver),
            _ => None,
        }
    }
}

/// User principal - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}
