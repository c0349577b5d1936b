//! Pickup point (PVZ) domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::reception::ReceptionWithProducts;
use crate::errors::{AppError, AppResult};

/// Cities in which pickup points may be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum City {
    #[serde(rename = "Москва")]
    Moscow,
    #[serde(rename = "Санкт-Петербург")]
    SaintPetersburg,
    #[serde(rename = "Казань")]
    Kazan,
}

impl City {
    /// Parse a city from its wire representation.
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "Москва" => Ok(City::Moscow),
            "Санкт-Петербург" => Ok(City::SaintPetersburg),
            "Казань" => Ok(City::Kazan),
            _ => Err(AppError::InvalidCity),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            City::Moscow => "Москва",
            City::SaintPetersburg => "Санкт-Петербург",
            City::Kazan => "Казань",
        }
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pickup point domain entity.
///
/// Immutable after creation; owns its receptions.
#[derive(Debug, Clone, Serialize)]
pub struct Pvz {
    pub id: Uuid,
    pub registration_date: DateTime<Utc>,
    pub city: City,
}

/// Pickup point response
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PvzResponse {
    /// Unique pickup point identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Registration timestamp
    pub registration_date: DateTime<Utc>,
    /// City name
    #[schema(example = "Москва")]
    pub city: String,
}

impl From<Pvz> for PvzResponse {
    fn from(pvz: Pvz) -> Self {
        Self {
            id: pvz.id,
            registration_date: pvz.registration_date,
            city: pvz.city.to_string(),
        }
    }
}

/// A pickup point with its receptions and their products, as returned
/// by the list endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PvzWithReceptions {
    pub pvz: PvzResponse,
    pub receptions: Vec<ReceptionWithProducts>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn allow_listed_cities_parse() {
        assert_eq!(City::parse("Москва").unwrap(), City::Moscow);
        assert_eq!(
            City::parse("Санкт-Петербург").unwrap(),
            City::SaintPetersburg
        );
        assert_eq!(City::parse("Казань").unwrap(), City::Kazan);
    }

    #[test]
    fn other_cities_rejected() {
        assert!(matches!(
            City::parse("Новосибирск"),
            Err(AppError::InvalidCity)
        ));
        assert!(matches!(City::parse(""), Err(AppError::InvalidCity)));
    }
}
