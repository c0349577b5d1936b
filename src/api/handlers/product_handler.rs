//! Product handlers.

use axum::{extract::State, routing::post, Extension, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_role, CurrentUser};
use crate::api::AppState;
use crate::domain::{ProductResponse, UserRole};
use crate::errors::AppResult;
use crate::types::Created;

/// Product intake request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddProductRequest {
    /// Product type
    #[serde(rename = "type")]
    #[schema(example = "электроника")]
    pub product_type: String,
    /// Pickup point whose active reception takes the product
    #[serde(rename = "pvzId")]
    pub pvz_id: Uuid,
}

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/", post(add_product))
}

/// Add a product to the active reception (employee only)
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = AddProductRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Product recorded", body = ProductResponse),
        (status = 400, description = "Unknown product type or no active reception"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Requires employee role")
    )
)]
pub async fn add_product(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<AddProductRequest>,
) -> AppResult<Created<ProductResponse>> {
    require_role(&user, UserRole::Employee)?;

    let product = state
        .pvz_service
        .add_product(payload.pvz_id, payload.product_type)
        .await?;

    Ok(Created(product))
}
