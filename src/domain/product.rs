//! Product domain entity - a single item recorded against an active reception.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Product type allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ProductType {
    #[serde(rename = "электроника")]
    Electronics,
    #[serde(rename = "одежда")]
    Clothing,
    #[serde(rename = "обувь")]
    Shoes,
}

impl ProductType {
    /// Parse a product type from its wire representation.
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "электроника" => Ok(ProductType::Electronics),
            "одежда" => Ok(ProductType::Clothing),
            "обувь" => Ok(ProductType::Shoes),
            _ => Err(AppError::InvalidProductType),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Electronics => "электроника",
            ProductType::Clothing => "одежда",
            ProductType::Shoes => "обувь",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Product domain entity.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    pub product_type: ProductType,
    pub reception_id: Uuid,
}

/// Product response
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Unique product identifier
    pub id: Uuid,
    /// Creation timestamp
    pub date_time: DateTime<Utc>,
    /// Product type
    #[serde(rename = "type")]
    #[schema(example = "электроника")]
    pub product_type: String,
    /// Owning reception
    pub reception_id: Uuid,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            date_time: product.date_time,
            product_type: product.product_type.to_string(),
            reception_id: product.reception_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_listed_types_parse() {
        assert_eq!(
            ProductType::parse("электроника").unwrap(),
            ProductType::Electronics
        );
        assert_eq!(ProductType::parse("одежда").unwrap(), ProductType::Clothing);
        assert_eq!(ProductType::parse("обувь").unwrap(), ProductType::Shoes);
    }

    #[test]
    fn other_types_rejected() {
        assert!(matches!(
            ProductType::parse("мебель"),
            Err(AppError::InvalidProductType)
        ));
    }
}
