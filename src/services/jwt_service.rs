//! Servicio JWT
//!
//! Emisión y validación de tokens de acceso. El secreto viene de
//! `JWT_SECRET`; el core solo consume el par (user_id, rol) verificado.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;
use uuid::Uuid;

use crate::models::user::{User, UserRole};
use crate::utils::errors::{AppError, AppResult};

/// Claims del JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Configuración JWT
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub token_duration: Duration,
}

impl JwtConfig {
    pub fn new() -> Self {
        let secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "change-this-secret-in-production".to_string());
        let hours = env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);

        Self {
            secret,
            algorithm: Algorithm::HS256,
            token_duration: Duration::hours(hours),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Servicio JWT
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new() -> Self {
        let config = JwtConfig::new();
        let encoding_key = EncodingKey::from_secret(config.secret.as_ref());
        let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Genera un token de acceso para el usuario
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + self.config.token_duration;

        let claims = JwtClaims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Error generating token: {}", e)))
    }

    /// Valida y decodifica un token
    pub fn validate_token(&self, token: &str) -> AppResult<JwtClaims> {
        let validation = Validation::new(self.config.algorithm);

        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }

    /// Extrae el par (user_id, rol) verificado que consume el core
    pub fn verified_identity(&self, token: &str) -> AppResult<(Uuid, UserRole)> {
        let claims = self.validate_token(token)?;
        let role = UserRole::from_str(&claims.role)
            .ok_or_else(|| AppError::Unauthorized("Invalid role in token".to_string()))?;
        Ok((claims.sub, role))
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            email: "juan.perez@example.com".to_string(),
            password_hash: "irrelevant".to_string(),
            full_name: "Juan Pérez".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_generate_and_validate_token() {
        let jwt_service = JwtService::new();
        let user = test_user(UserRole::Logistics);

        let token = jwt_service.generate_token(&user).unwrap();
        assert!(!token.is_empty());

        let claims = jwt_service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "juan.perez@example.com");
        assert_eq!(claims.role, "logistics");
    }

    #[test]
    fn test_verified_identity_roundtrip() {
        let jwt_service = JwtService::new();
        let user = test_user(UserRole::Driver);

        let token = jwt_service.generate_token(&user).unwrap();
        let (id, role) = jwt_service.verified_identity(&token).unwrap();
        assert_eq!(id, user.id);
        assert_eq!(role, UserRole::Driver);
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let jwt_service = JwtService::new();
        assert!(jwt_service.validate_token("not-a-token").is_err());
    }
}
