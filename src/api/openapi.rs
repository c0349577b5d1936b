//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, product_handler, pvz_handler, reception_handler};
use crate::domain::{
    City, ProductResponse, ProductType, PvzResponse, PvzWithReceptions, ReceptionResponse,
    ReceptionStatus, ReceptionWithProducts, UserResponse, UserRole,
};
use crate::services::TokenResponse;

/// OpenAPI documentation for the pickup point service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PVZ Service",
        version = "0.1.0",
        description = "Pickup point management service: registration, goods receptions, and product intake",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::dummy_login,
        // Pickup point endpoints
        pvz_handler::create_pvz,
        pvz_handler::get_pvz,
        pvz_handler::close_last_reception,
        pvz_handler::delete_last_product,
        // Lifecycle endpoints
        reception_handler::create_reception,
        product_handler::add_product,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            City,
            ProductType,
            ReceptionStatus,
            PvzResponse,
            ReceptionResponse,
            ProductResponse,
            PvzWithReceptions,
            ReceptionWithProducts,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::DummyLoginRequest,
            TokenResponse,
            // Lifecycle request types
            pvz_handler::CreatePvzRequest,
            reception_handler::CreateReceptionRequest,
            product_handler::AddProductRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Pickup points", description = "Pickup point registration and listing"),
        (name = "Receptions", description = "Goods reception lifecycle"),
        (name = "Products", description = "Product intake")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/login or /api/dummyLogin"))
                        .build(),
                ),
            );
        }
    }
}
