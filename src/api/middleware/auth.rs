//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::UserRole;
use crate::errors::AppError;

/// Authenticated user extracted from JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    /// Check if user may create pickup points.
    pub fn is_moderator(&self) -> bool {
        self.role == UserRole::Moderator
    }

    /// Check if user may run the reception/product lifecycle.
    pub fn is_employee(&self) -> bool {
        self.role == UserRole::Employee
    }
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    // A token carrying an unknown role is not a valid credential.
    let role = UserRole::parse(&claims.role).map_err(|_| AppError::Unauthorized)?;

    let current_user = CurrentUser {
        id: claims.sub,
        email: claims.email,
        role,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Check that the user holds exactly the required role.
///
/// There is no privilege hierarchy between moderator and employee;
/// each role gates its own set of operations.
pub fn require_role(user: &CurrentUser, required: UserRole) -> Result<(), AppError> {
    if user.role == required {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
