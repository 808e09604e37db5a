//! Middleware de autenticación
//!
//! Valida el Bearer token y deja en las extensiones del request la
//! identidad verificada (id, rol) que consumen los handlers. El core
//! nunca autentica: solo consume este par ya verificado.

use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::models::user::UserRole;
use crate::services::jwt_service::JwtService;
use crate::utils::errors::AppError;

/// Identidad verificada del request
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: UserRole,
}

pub async fn require_auth(mut request: Request, next: Next) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Expected a Bearer token".to_string()))?;

    let (id, role) = JwtService::new().verified_identity(token)?;
    request.extensions_mut().insert(AuthUser { id, role });

    Ok(next.run(request).await)
}
