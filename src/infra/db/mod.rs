//! PostgreSQL access for the pickup point store.
//!
//! Wraps the SeaORM connection pool together with the migration runner.
//! The serve path connects and brings the schema up to date in one step;
//! the migrate command connects bare and drives migrations explicitly.

use sea_orm::{ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement};
use sea_orm_migration::MigratorTrait;

use crate::config::Config;
use crate::errors::AppResult;

pub mod migrations;

pub use migrations::Migrator;

/// Shared connection pool with migration helpers.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Connect and apply any pending migrations.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let connection = SeaDatabase::connect(&config.database_url).await?;
        Migrator::up(&connection, None).await?;

        tracing::info!("database connected, schema up to date");

        Ok(Self { connection })
    }

    /// Connect without touching the schema (migrate command).
    pub async fn connect_without_migrations(config: &Config) -> AppResult<Self> {
        let connection = SeaDatabase::connect(&config.database_url).await?;
        Ok(Self { connection })
    }

    /// Clone of the pooled connection for wiring repositories.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Apply pending migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.connection, None).await?;
        Ok(())
    }

    /// Roll back the most recent migration.
    pub async fn rollback_migration(&self) -> AppResult<()> {
        Migrator::down(&self.connection, Some(1)).await?;
        Ok(())
    }

    /// Every known migration with its applied flag.
    pub async fn migration_status(&self) -> AppResult<Vec<(String, bool)>> {
        use sea_orm::{EntityTrait, QueryOrder};
        use sea_orm_migration::seaql_migrations;

        let applied: std::collections::HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        Ok(Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect())
    }

    /// Drop all tables and re-run every migration.
    pub async fn fresh_migrations(&self) -> AppResult<()> {
        Migrator::fresh(&self.connection).await?;
        Ok(())
    }

    /// Liveness probe used by the health endpoint.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}
