//! Reception handlers.

use axum::{extract::State, routing::post, Extension, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_role, CurrentUser};
use crate::api::AppState;
use crate::domain::{ReceptionResponse, UserRole};
use crate::errors::AppResult;
use crate::types::Created;

/// Reception opening request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReceptionRequest {
    /// Pickup point to open the reception at
    #[serde(rename = "pvzId")]
    pub pvz_id: Uuid,
}

/// Create reception routes
pub fn reception_routes() -> Router<AppState> {
    Router::new().route("/", post(create_reception))
}

/// Open a new reception (employee only)
#[utoipa::path(
    post,
    path = "/receptions",
    tag = "Receptions",
    request_body = CreateReceptionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Reception opened", body = ReceptionResponse),
        (status = 400, description = "An in-progress reception already exists"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Requires employee role")
    )
)]
pub async fn create_reception(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateReceptionRequest>,
) -> AppResult<Created<ReceptionResponse>> {
    require_role(&user, UserRole::Employee)?;

    let reception = state.pvz_service.open_reception(payload.pvz_id).await?;

    Ok(Created(reception))
}
