//! Shared application state
//!
//! Estado compartido que se pasa a través del router de Axum. El Resource
//! Store entra por inyección explícita: ningún módulo lo instancia como
//! estado global del proceso.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::store::ResourceStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResourceStore>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn ResourceStore>, config: EnvironmentConfig) -> Self {
        Self { store, config }
    }
}
