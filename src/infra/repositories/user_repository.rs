//! User repository - persistence for user accounts.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user;
use crate::domain::{User, UserRole};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user
    async fn create(&self, email: String, password_hash: String, role: UserRole)
        -> AppResult<User>;
}

/// SeaORM-backed user repository.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        result.map(User::try_from).transpose()
    }

    async fn create(
        &self,
        email: String,
        password_hash: String,
        role: UserRole,
    ) -> AppResult<User> {
        let active_model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash),
            role: Set(role.to_string()),
            created_at: Set(Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            // The unique index on email backs up the service-level check.
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("User"),
                _ => AppError::from(e),
            }
        })?;

        User::try_from(model)
    }
}
