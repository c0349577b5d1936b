//! Reception domain entity - a bounded goods-intake session at a pickup point.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{STATUS_CLOSED, STATUS_IN_PROGRESS};
use crate::domain::product::ProductResponse;
use crate::errors::{AppError, AppResult};

/// Reception lifecycle status.
///
/// The only transition is `InProgress -> Closed`; closed is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReceptionStatus {
    InProgress,
    Closed,
}

impl ReceptionStatus {
    /// Parse a status from its wire representation.
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            STATUS_IN_PROGRESS => Ok(ReceptionStatus::InProgress),
            STATUS_CLOSED => Ok(ReceptionStatus::Closed),
            _ => Err(AppError::validation(format!("invalid status '{}'", s))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReceptionStatus::InProgress => STATUS_IN_PROGRESS,
            ReceptionStatus::Closed => STATUS_CLOSED,
        }
    }
}

impl std::fmt::Display for ReceptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reception domain entity.
#[derive(Debug, Clone, Serialize)]
pub struct Reception {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    pub pvz_id: Uuid,
    pub status: ReceptionStatus,
}

/// Reception response
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceptionResponse {
    /// Unique reception identifier
    pub id: Uuid,
    /// Reception start timestamp
    pub date_time: DateTime<Utc>,
    /// Owning pickup point
    pub pvz_id: Uuid,
    /// Lifecycle status
    #[schema(example = "in_progress")]
    pub status: String,
}

impl From<Reception> for ReceptionResponse {
    fn from(reception: Reception) -> Self {
        Self {
            id: reception.id,
            date_time: reception.date_time,
            pvz_id: reception.pvz_id,
            status: reception.status.to_string(),
        }
    }
}

/// A reception with its products, in first-added order.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReceptionWithProducts {
    pub reception: ReceptionResponse,
    pub products: Vec<ProductResponse>,
}
