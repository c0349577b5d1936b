//! Serve command - connects the store, wires services, runs the server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    let db = Arc::new(Database::connect(&config).await?);

    let app = create_router(AppState::from_config(db, config));

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("failed to bind {}: {}", addr, e)))?;

    tracing::info!("listening on http://{}", addr);
    tracing::info!("swagger ui at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("server error: {}", e)))?;

    Ok(())
}
