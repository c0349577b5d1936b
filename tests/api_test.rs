//! Integration tests for the API surface.
//!
//! These tests exercise wire formats, role gating, and error mapping
//! without requiring a database connection.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use pvz_service::api::middleware::{require_role, CurrentUser};
use pvz_service::domain::{
    Product, ProductResponse, Pvz, PvzResponse, Reception, ReceptionResponse, ReceptionStatus,
    UserRole,
};
use pvz_service::errors::{AppError, AppResult};
use pvz_service::services::{AuthService, Claims, TokenResponse};

// =============================================================================
// Mock Services for Testing
// =============================================================================

/// Mock auth service that returns predefined responses
struct MockAuthService;

#[async_trait]
impl AuthService for MockAuthService {
    async fn register(
        &self,
        email: String,
        _password: String,
        role: UserRole,
    ) -> AppResult<pvz_service::domain::User> {
        Ok(pvz_service::domain::User::new(
            Uuid::new_v4(),
            email,
            "hashed".to_string(),
            role,
        ))
    }

    async fn login(&self, _email: String, _password: String) -> AppResult<TokenResponse> {
        Ok(TokenResponse {
            access_token: "mock-token".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 86400,
        })
    }

    fn dummy_login(&self, role: UserRole) -> AppResult<TokenResponse> {
        Ok(TokenResponse {
            access_token: format!("mock-token-{}", role),
            token_type: "Bearer".to_string(),
            expires_in: 86400,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token == "valid-test-token" {
            Ok(Claims {
                sub: Uuid::new_v4(),
                email: "test@example.com".to_string(),
                role: "employee".to_string(),
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            })
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

fn current_user(role: UserRole) -> CurrentUser {
    CurrentUser {
        id: Uuid::new_v4(),
        email: "test@example.com".to_string(),
        role,
    }
}

// =============================================================================
// Role Gating Tests
// =============================================================================

#[tokio::test]
async fn test_moderator_gate_rejects_employee() {
    let employee = current_user(UserRole::Employee);
    let result = require_role(&employee, UserRole::Moderator);

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_employee_gate_rejects_moderator() {
    // No privilege hierarchy: moderators cannot run the lifecycle.
    let moderator = current_user(UserRole::Moderator);
    let result = require_role(&moderator, UserRole::Employee);

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_matching_role_passes_gate() {
    let moderator = current_user(UserRole::Moderator);
    assert!(require_role(&moderator, UserRole::Moderator).is_ok());

    let employee = current_user(UserRole::Employee);
    assert!(require_role(&employee, UserRole::Employee).is_ok());
}

// =============================================================================
// Error Mapping Tests
// =============================================================================

#[tokio::test]
async fn test_lifecycle_errors_map_to_bad_request() {
    for err in [
        AppError::InvalidCity,
        AppError::InvalidProductType,
        AppError::FutureDate,
        AppError::NoActiveReception,
        AppError::ActiveReceptionConflict,
    ] {
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_auth_errors_map_to_expected_statuses() {
    assert_eq!(
        AppError::Unauthorized.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::InvalidCredentials.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::Forbidden.into_response().status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        AppError::conflict("User").into_response().status(),
        StatusCode::CONFLICT
    );
}

// =============================================================================
// Wire Format Tests
// =============================================================================

#[tokio::test]
async fn test_pvz_response_uses_camel_case() {
    let pvz = Pvz {
        id: Uuid::new_v4(),
        registration_date: Utc::now(),
        city: pvz_service::domain::City::Moscow,
    };
    let value = serde_json::to_value(PvzResponse::from(pvz)).unwrap();

    assert!(value.get("registrationDate").is_some());
    assert_eq!(value["city"], "Москва");
}

#[tokio::test]
async fn test_reception_response_field_names() {
    let reception = Reception {
        id: Uuid::new_v4(),
        date_time: Utc::now(),
        pvz_id: Uuid::new_v4(),
        status: ReceptionStatus::InProgress,
    };
    let value = serde_json::to_value(ReceptionResponse::from(reception)).unwrap();

    assert!(value.get("dateTime").is_some());
    assert!(value.get("pvzId").is_some());
    assert_eq!(value["status"], "in_progress");
}

#[tokio::test]
async fn test_product_response_renames_type_field() {
    let product = Product {
        id: Uuid::new_v4(),
        date_time: Utc::now(),
        product_type: pvz_service::domain::ProductType::Shoes,
        reception_id: Uuid::new_v4(),
    };
    let value = serde_json::to_value(ProductResponse::from(product)).unwrap();

    assert_eq!(value["type"], "обувь");
    assert!(value.get("receptionId").is_some());
}

#[tokio::test]
async fn test_role_deserializes_from_lowercase() {
    let role: UserRole = serde_json::from_value(json!("moderator")).unwrap();
    assert_eq!(role, UserRole::Moderator);

    let invalid: Result<UserRole, _> = serde_json::from_value(json!("admin"));
    assert!(invalid.is_err());
}

#[tokio::test]
async fn test_date_time_round_trips_rfc3339() {
    let raw = json!("2024-06-01T10:00:00Z");
    let parsed: DateTime<Utc> = serde_json::from_value(raw).unwrap();
    assert_eq!(parsed.timestamp(), 1717236000);
}

// =============================================================================
// Mock Service Tests
// =============================================================================

#[tokio::test]
async fn test_mock_auth_service_register() {
    let service = MockAuthService;
    let user = service
        .register(
            "new@example.com".to_string(),
            "password123".to_string(),
            UserRole::Employee,
        )
        .await
        .unwrap();

    assert_eq!(user.email, "new@example.com");
    assert_eq!(user.role, UserRole::Employee);
}

#[tokio::test]
async fn test_mock_auth_service_verify_valid_token() {
    let service = MockAuthService;
    let claims = service.verify_token("valid-test-token").unwrap();

    assert_eq!(claims.email, "test@example.com");
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn test_mock_auth_service_verify_invalid_token() {
    let service = MockAuthService;
    let result = service.verify_token("invalid-token");

    assert!(matches!(result.unwrap_err(), AppError::Unauthorized));
}

// Database-backed lifecycle and concurrency tests live in
// tests/lifecycle_db_test.rs; they are ignored by default and need a
// running PostgreSQL (see the notes at the top of that file).
