//! Pickup point service - orchestrates the reception/product lifecycle.
//!
//! SOLID (SRP): Validates requests and delegates state transitions to
//! the repository, which owns the transactional shapes.
//!
//! All validation here is pure and synchronous; a request that fails
//! validation never reaches the database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{City, ProductResponse, ProductType, Pvz, PvzResponse, PvzWithReceptions, ReceptionResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::{ListPvzFilter, UnitOfWork};
use crate::types::PaginationParams;

/// Pickup point service trait for dependency injection.
#[async_trait]
pub trait PvzService: Send + Sync {
    /// Register a new pickup point in an allow-listed city
    async fn create_pvz(
        &self,
        city: String,
        registration_date: Option<DateTime<Utc>>,
    ) -> AppResult<PvzResponse>;

    /// Open a new reception for a pickup point
    async fn open_reception(&self, pvz_id: Uuid) -> AppResult<ReceptionResponse>;

    /// Add a product to the active reception of a pickup point
    async fn add_product(&self, pvz_id: Uuid, product_type: String) -> AppResult<ProductResponse>;

    /// Remove the most recently added product from the active reception
    async fn remove_last_product(&self, pvz_id: Uuid) -> AppResult<()>;

    /// Close the active reception of a pickup point
    async fn close_reception(&self, pvz_id: Uuid) -> AppResult<ReceptionResponse>;

    /// List pickup points with receptions filtered by date range
    async fn list_pvz(
        &self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        pagination: PaginationParams,
    ) -> AppResult<Vec<PvzWithReceptions>>;
}

/// Reject timestamps that lie in the future.
fn ensure_not_future(date: DateTime<Utc>) -> AppResult<()> {
    if date > Utc::now() {
        return Err(AppError::FutureDate);
    }
    Ok(())
}

/// Concrete implementation of PvzService using Unit of Work.
pub struct PvzManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PvzManager<U> {
    /// Create new pickup point service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> PvzService for PvzManager<U> {
    async fn create_pvz(
        &self,
        city: String,
        registration_date: Option<DateTime<Utc>>,
    ) -> AppResult<PvzResponse> {
        let city = City::parse(&city)?;

        let registration_date = match registration_date {
            Some(date) => {
                ensure_not_future(date)?;
                date
            }
            None => Utc::now(),
        };

        let pvz = Pvz {
            id: Uuid::new_v4(),
            registration_date,
            city,
        };

        let created = self.uow.pvz().create_pvz(pvz).await?;
        Ok(created.into())
    }

    async fn open_reception(&self, pvz_id: Uuid) -> AppResult<ReceptionResponse> {
        let reception = self.uow.pvz().open_reception(pvz_id).await?;
        Ok(reception.into())
    }

    async fn add_product(&self, pvz_id: Uuid, product_type: String) -> AppResult<ProductResponse> {
        let product_type = ProductType::parse(&product_type)?;
        let product = self.uow.pvz().add_product(pvz_id, product_type).await?;
        Ok(product.into())
    }

    async fn remove_last_product(&self, pvz_id: Uuid) -> AppResult<()> {
        self.uow.pvz().remove_last_product(pvz_id).await
    }

    async fn close_reception(&self, pvz_id: Uuid) -> AppResult<ReceptionResponse> {
        let reception = self.uow.pvz().close_reception(pvz_id).await?;
        Ok(reception.into())
    }

    async fn list_pvz(
        &self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        pagination: PaginationParams,
    ) -> AppResult<Vec<PvzWithReceptions>> {
        pagination.validate()?;

        if let Some(start) = start_date {
            ensure_not_future(start)?;
        }
        if let Some(end) = end_date {
            ensure_not_future(end)?;
        }
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                return Err(AppError::validation("endDate must not precede startDate"));
            }
        }

        let filter = ListPvzFilter {
            start_date,
            end_date,
            limit: pagination.limit,
            offset: pagination.offset(),
        };

        self.uow.pvz().list_pvz(filter).await
    }
}
