//! Pickup point handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_role, CurrentUser};
use crate::api::AppState;
use crate::domain::{PvzResponse, PvzWithReceptions, ReceptionResponse, UserRole};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse, PaginationParams};

/// Pickup point registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePvzRequest {
    /// City the pickup point operates in
    #[schema(example = "Москва")]
    pub city: String,
    /// Optional registration timestamp; defaults to now
    #[serde(rename = "registrationDate")]
    pub registration_date: Option<DateTime<Utc>>,
}

/// Query parameters for the pickup point list endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListPvzQuery {
    /// Keep receptions starting at this timestamp
    #[serde(rename = "startDate")]
    pub start_date: Option<DateTime<Utc>>,
    /// Keep receptions up to this timestamp
    #[serde(rename = "endDate")]
    pub end_date: Option<DateTime<Utc>>,
    /// Page number, 1-indexed
    pub page: Option<u64>,
    /// Pickup points per page, at most 30
    pub limit: Option<u64>,
}

/// Create pickup point routes
pub fn pvz_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_pvz).get(get_pvz))
        .route("/:pvz_id/close_last_reception", post(close_last_reception))
        .route("/:pvz_id/delete_last_product", post(delete_last_product))
}

/// Register a new pickup point (moderator only)
#[utoipa::path(
    post,
    path = "/pvz",
    tag = "Pickup points",
    request_body = CreatePvzRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Pickup point created", body = PvzResponse),
        (status = 400, description = "Unknown city or future registration date"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Requires moderator role")
    )
)]
pub async fn create_pvz(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreatePvzRequest>,
) -> AppResult<Created<PvzResponse>> {
    require_role(&user, UserRole::Moderator)?;

    let pvz = state
        .pvz_service
        .create_pvz(payload.city, payload.registration_date)
        .await?;

    Ok(Created(pvz))
}

/// List pickup points with receptions and products
#[utoipa::path(
    get,
    path = "/pvz",
    tag = "Pickup points",
    params(ListPvzQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pickup point page", body = [PvzWithReceptions]),
        (status = 400, description = "Invalid date range or pagination"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn get_pvz(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Query(query): Query<ListPvzQuery>,
) -> AppResult<Json<Vec<PvzWithReceptions>>> {
    // Both roles may read the listing; authentication alone suffices.
    let mut pagination = PaginationParams::default();
    if let Some(page) = query.page {
        pagination.page = page;
    }
    if let Some(limit) = query.limit {
        pagination.limit = limit;
    }

    let points = state
        .pvz_service
        .list_pvz(query.start_date, query.end_date, pagination)
        .await?;

    Ok(Json(points))
}

/// Close the active reception of a pickup point (employee only)
#[utoipa::path(
    post,
    path = "/pvz/{pvz_id}/close_last_reception",
    tag = "Pickup points",
    params(("pvz_id" = Uuid, Path, description = "Pickup point identifier")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reception closed", body = ReceptionResponse),
        (status = 400, description = "No active reception"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Requires employee role")
    )
)]
pub async fn close_last_reception(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(pvz_id): Path<Uuid>,
) -> AppResult<Json<ReceptionResponse>> {
    require_role(&user, UserRole::Employee)?;

    let reception = state.pvz_service.close_reception(pvz_id).await?;

    Ok(Json(reception))
}

/// Remove the most recently added product (employee only)
#[utoipa::path(
    post,
    path = "/pvz/{pvz_id}/delete_last_product",
    tag = "Pickup points",
    params(("pvz_id" = Uuid, Path, description = "Pickup point identifier")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Last product removed"),
        (status = 400, description = "No active reception"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Requires employee role")
    )
)]
pub async fn delete_last_product(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(pvz_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    require_role(&user, UserRole::Employee)?;

    state.pvz_service.remove_last_product(pvz_id).await?;

    Ok(Json(MessageResponse::new("Last product removed")))
}
