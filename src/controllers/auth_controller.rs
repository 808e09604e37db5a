//! Controller de autenticación y usuarios

use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::repositories::store::{NewUser, ResourceStore, UserStore};
use crate::services::jwt_service::JwtService;
use crate::utils::errors::{AppError, AppResult};

pub struct AuthController {
    store: Arc<dyn ResourceStore>,
    jwt: JwtService,
}

impl AuthController {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self {
            store,
            jwt: JwtService::new(),
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserResponse> {
        request.validate()?;

        if self
            .store
            .find_user_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "User with email '{}' already exists",
                request.email
            )));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?;

        let user = self
            .store
            .create_user(NewUser {
                email: request.email,
                password_hash,
                full_name: request.full_name,
                role: request.role,
            })
            .await?;

        Ok(user.into())
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let user = self
            .store
            .find_user_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Error verifying password: {}", e)))?;
        if !valid {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = self.jwt.generate_token(&user)?;

        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    pub async fn profile(&self, user_id: Uuid) -> AppResult<UserResponse> {
        let user = self.store.get_user(user_id).await?;
        Ok(user.into())
    }

    pub async fn get_user(&self, id: Uuid) -> AppResult<UserResponse> {
        let user = self.store.get_user(id).await?;
        Ok(user.into())
    }

    pub async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.store.list_users().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }
}
