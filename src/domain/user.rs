//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_EMPLOYEE, ROLE_MODERATOR};
use crate::errors::{AppError, AppResult};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Moderator,
    Employee,
}

impl UserRole {
    /// Parse a role from its wire representation.
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            ROLE_MODERATOR => Ok(UserRole::Moderator),
            ROLE_EMPLOYEE => Ok(UserRole::Employee),
            _ => Err(AppError::validation(format!(
                "invalid role '{}', allowed: moderator, employee",
                s
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Moderator => ROLE_MODERATOR,
            UserRole::Employee => ROLE_EMPLOYEE,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(id: Uuid, email: String, password_hash: String, role: UserRole) -> Self {
        Self {
            id,
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        }
    }

    /// Check if user may create pickup points
    pub fn is_moderator(&self) -> bool {
        self.role == UserRole::Moderator
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User role
    #[schema(example = "employee")]
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trip() {
        assert_eq!(UserRole::parse("moderator").unwrap(), UserRole::Moderator);
        assert_eq!(UserRole::parse("employee").unwrap(), UserRole::Employee);
        assert_eq!(UserRole::Moderator.to_string(), "moderator");
    }

    #[test]
    fn unknown_role_rejected() {
        assert!(UserRole::parse("admin").is_err());
    }
}
