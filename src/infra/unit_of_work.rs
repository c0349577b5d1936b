//! Unit of Work - centralized repository access.
//!
//! Services depend on this trait instead of concrete stores. The
//! lifecycle operations with multi-statement transaction shapes
//! (add/remove product, close reception) manage their transactions
//! inside `PvzStore`, so this container carries no transaction state
//! of its own; it owns the shared connection pool and hands out
//! repositories bound to it.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{PvzRepository, PvzStore, UserRepository, UserStore};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get pickup point repository
    fn pvz(&self) -> Arc<dyn PvzRepository>;
}

/// Concrete implementation of UnitOfWork backed by SeaORM stores.
pub struct Persistence {
    user_repo: Arc<UserStore>,
    pvz_repo: Arc<PvzStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance over a shared connection pool
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            pvz_repo: Arc::new(PvzStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn pvz(&self) -> Arc<dyn PvzRepository> {
        self.pvz_repo.clone()
    }
}
