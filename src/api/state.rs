//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{AuthService, PvzService, ServiceContainer, Services};

/// Application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Pickup point service
    pub pvz_service: Arc<dyn PvzService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the service stack over the shared connection pool.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            pvz_service: container.pvz(),
            database,
        }
    }
}
