//! Migrate command - drives schema migrations by hand.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Connect bare; each action decides what to do with the schema.
    let db = Database::connect_without_migrations(&config).await?;

    match args.action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            tracing::info!("schema up to date");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            tracing::info!("rolled back one migration");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                println!("{}: {}", name, if applied { "applied" } else { "pending" });
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("dropping all tables and re-running migrations");
            db.fresh_migrations().await?;
            tracing::info!("schema rebuilt");
        }
    }

    Ok(())
}
