//! Service Container - Centralized service access.
//!
//! SOLID (SRP): Manages service lifecycle and access.
//! SOLID (DIP): Depends on service traits, not implementations.

use std::sync::Arc;

use super::{AuthService, PvzService};
use crate::config::Config;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get pickup point service
    fn pvz(&self) -> Arc<dyn PvzService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    pvz_service: Arc<dyn PvzService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{Authenticator, PvzManager};

        let uow = Arc::new(Persistence::new(db));
        let auth_service = Arc::new(Authenticator::new(uow.clone(), config));
        let pvz_service = Arc::new(PvzManager::new(uow));

        Self {
            auth_service,
            pvz_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn pvz(&self) -> Arc<dyn PvzService> {
        self.pvz_service.clone()
    }
}
