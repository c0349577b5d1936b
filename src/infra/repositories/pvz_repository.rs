//! Pickup point repository - the transactional core of the service.
//!
//! Owns all durable state for pickup points, receptions, and products.
//! The reception/product lifecycle operations here carry the concurrency
//! contract:
//!
//! - `open_reception` relies on a partial unique index over
//!   `(pvz_id) WHERE status = 'in_progress'`; two concurrent opens race
//!   on the insert itself, never on an application-level check.
//! - `add_product`, `remove_last_product`, and `close_reception` each run
//!   in a single transaction that first locks the active reception row
//!   with `FOR UPDATE`, serializing product mutation per pickup point.
//!
//! A transaction that is dropped without commit (error path or caller
//! cancellation) is rolled back by the pool.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbBackend, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
    Statement, TransactionTrait,
};
use uuid::Uuid;

use super::entities::{product, pvz, reception};
use crate::config::{STATUS_CLOSED, STATUS_IN_PROGRESS};
use crate::domain::{
    Product, ProductResponse, ProductType, Pvz, PvzResponse, PvzWithReceptions, Reception,
    ReceptionResponse, ReceptionWithProducts,
};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Filter and pagination for the pickup point list query.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListPvzFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub limit: u64,
    pub offset: u64,
}

/// Pickup point repository trait for dependency injection.
///
/// One primitive per lifecycle service operation, plus the active
/// reception lookup.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PvzRepository: Send + Sync {
    /// Persist a new pickup point
    async fn create_pvz(&self, pvz: Pvz) -> AppResult<Pvz>;

    /// Open a new in-progress reception for a pickup point.
    ///
    /// Fails with `ActiveReceptionConflict` when one is already open.
    async fn open_reception(&self, pvz_id: Uuid) -> AppResult<Reception>;

    /// Get the single in-progress reception for a pickup point.
    async fn get_active_reception(&self, pvz_id: Uuid) -> AppResult<Reception>;

    /// Insert a product into the active reception of a pickup point.
    async fn add_product(&self, pvz_id: Uuid, product_type: ProductType) -> AppResult<Product>;

    /// Delete the most recently added product of the active reception.
    ///
    /// A reception without products is a success no-op.
    async fn remove_last_product(&self, pvz_id: Uuid) -> AppResult<()>;

    /// Move the active reception to the closed status.
    async fn close_reception(&self, pvz_id: Uuid) -> AppResult<Reception>;

    /// List pickup points with nested receptions and products.
    async fn list_pvz(&self, filter: ListPvzFilter) -> AppResult<Vec<PvzWithReceptions>>;
}

/// SeaORM-backed pickup point repository.
pub struct PvzStore {
    db: DatabaseConnection,
}

impl PvzStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Select the active reception for a point and lock its row for the
    /// rest of the transaction.
    async fn lock_active_reception(
        txn: &DatabaseTransaction,
        pvz_id: Uuid,
    ) -> AppResult<reception::Model> {
        reception::Entity::find()
            .filter(reception::Column::PvzId.eq(pvz_id))
            .filter(reception::Column::Status.eq(STATUS_IN_PROGRESS))
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or(AppError::NoActiveReception)
    }
}

#[async_trait]
impl PvzRepository for PvzStore {
    async fn create_pvz(&self, pvz: Pvz) -> AppResult<Pvz> {
        let active_model = pvz::ActiveModel {
            id: Set(pvz.id),
            registration_date: Set(pvz.registration_date),
            city: Set(pvz.city.to_string()),
        };

        let model = active_model.insert(&self.db).await?;
        Pvz::try_from(model)
    }

    async fn open_reception(&self, pvz_id: Uuid) -> AppResult<Reception> {
        let active_model = reception::ActiveModel {
            id: Set(Uuid::new_v4()),
            date_time: Set(Utc::now()),
            pvz_id: Set(pvz_id),
            status: Set(STATUS_IN_PROGRESS.to_string()),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            match e.sql_err() {
                // Loser of a concurrent open hits the partial unique index.
                Some(SqlErr::UniqueConstraintViolation(_)) => AppError::ActiveReceptionConflict,
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => AppError::NotFound,
                _ => AppError::from(e),
            }
        })?;

        Reception::try_from(model)
    }

    async fn get_active_reception(&self, pvz_id: Uuid) -> AppResult<Reception> {
        let model = reception::Entity::find()
            .filter(reception::Column::PvzId.eq(pvz_id))
            .filter(reception::Column::Status.eq(STATUS_IN_PROGRESS))
            .one(&self.db)
            .await?
            .ok_or(AppError::NoActiveReception)?;

        Reception::try_from(model)
    }

    async fn add_product(&self, pvz_id: Uuid, product_type: ProductType) -> AppResult<Product> {
        let txn = self.db.begin().await?;

        let active_reception = Self::lock_active_reception(&txn, pvz_id).await?;

        let active_model = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            date_time: Set(Utc::now()),
            product_type: Set(product_type.to_string()),
            reception_id: Set(active_reception.id),
        };
        let model = active_model.insert(&txn).await?;

        txn.commit().await?;
        Product::try_from(model)
    }

    async fn remove_last_product(&self, pvz_id: Uuid) -> AppResult<()> {
        let txn = self.db.begin().await?;

        let active_reception = Self::lock_active_reception(&txn, pvz_id).await?;

        let last_product = product::Entity::find()
            .filter(product::Column::ReceptionId.eq(active_reception.id))
            .order_by_desc(product::Column::DateTime)
            .one(&txn)
            .await?;

        // LIFO discipline: only the most recent product is removable.
        // An empty reception makes the delete an idempotent no-op.
        if let Some(product) = last_product {
            product.delete(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    async fn close_reception(&self, pvz_id: Uuid) -> AppResult<Reception> {
        let txn = self.db.begin().await?;

        let active_reception = Self::lock_active_reception(&txn, pvz_id).await?;

        let mut active_model: reception::ActiveModel = active_reception.into();
        active_model.status = Set(STATUS_CLOSED.to_string());
        let model = active_model.update(&txn).await?;

        txn.commit().await?;
        Reception::try_from(model)
    }

    async fn list_pvz(&self, filter: ListPvzFilter) -> AppResult<Vec<PvzWithReceptions>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            LIST_PVZ_SQL,
            [
                (filter.limit as i64).into(),
                (filter.offset as i64).into(),
                filter.start_date.into(),
                filter.end_date.into(),
            ],
        );

        let rows = self.db.query_all(stmt).await?;

        let mut flat = Vec::with_capacity(rows.len());
        for row in rows {
            let reception = match row.try_get::<Option<Uuid>>("", "reception_id")? {
                Some(id) => Some(ListReceptionRow {
                    id,
                    date_time: row.try_get("", "reception_date_time")?,
                    status: row.try_get("", "reception_status")?,
                }),
                None => None,
            };
            let product = match row.try_get::<Option<Uuid>>("", "product_id")? {
                Some(id) => Some(ListProductRow {
                    id,
                    date_time: row.try_get("", "product_date_time")?,
                    product_type: row.try_get("", "product_type")?,
                }),
                None => None,
            };
            flat.push(ListRow {
                pvz_id: row.try_get("", "pvz_id")?,
                registration_date: row.try_get("", "registration_date")?,
                city: row.try_get("", "city")?,
                reception,
                product,
            });
        }

        Ok(assemble_pvz_rows(flat))
    }
}

/// Outer join across pvz -> receptions -> products.
///
/// Pagination applies to distinct pickup points via the subquery, and the
/// reception date filter lives in the join condition so a point with no
/// matching receptions still yields one row with null reception columns.
const LIST_PVZ_SQL: &str = r#"
SELECT p.id AS pvz_id, p.registration_date, p.city,
       r.id AS reception_id, r.date_time AS reception_date_time, r.status AS reception_status,
       pr.id AS product_id, pr.date_time AS product_date_time, pr.type AS product_type
FROM (
    SELECT id, registration_date, city
    FROM pvz
    ORDER BY registration_date, id
    LIMIT $1 OFFSET $2
) p
LEFT JOIN receptions r ON r.pvz_id = p.id
    AND ($3::timestamptz IS NULL OR r.date_time >= $3)
    AND ($4::timestamptz IS NULL OR r.date_time <= $4)
LEFT JOIN products pr ON pr.reception_id = r.id
ORDER BY p.registration_date, p.id, r.date_time, pr.date_time
"#;

/// One flat row of the list query.
#[derive(Debug, Clone)]
struct ListRow {
    pvz_id: Uuid,
    registration_date: DateTime<Utc>,
    city: String,
    reception: Option<ListReceptionRow>,
    product: Option<ListProductRow>,
}

#[derive(Debug, Clone)]
struct ListReceptionRow {
    id: Uuid,
    date_time: DateTime<Utc>,
    status: String,
}

#[derive(Debug, Clone)]
struct ListProductRow {
    id: Uuid,
    date_time: DateTime<Utc>,
    product_type: String,
}

/// Reassemble flat outer-join rows into the nested structure in one
/// streaming pass. Points, receptions, and products keep first-seen
/// order; a null reception column never becomes a phantom reception.
fn assemble_pvz_rows(rows: Vec<ListRow>) -> Vec<PvzWithReceptions> {
    let mut result: Vec<PvzWithReceptions> = Vec::new();
    let mut pvz_index: HashMap<Uuid, usize> = HashMap::new();

    for row in rows {
        let pvz_idx = *pvz_index.entry(row.pvz_id).or_insert_with(|| {
            result.push(PvzWithReceptions {
                pvz: PvzResponse {
                    id: row.pvz_id,
                    registration_date: row.registration_date,
                    city: row.city.clone(),
                },
                receptions: Vec::new(),
            });
            result.len() - 1
        });

        let Some(reception_row) = row.reception else {
            continue;
        };

        let entry = &mut result[pvz_idx];
        let rec_idx = match entry
            .receptions
            .iter()
            .position(|r| r.reception.id == reception_row.id)
        {
            Some(idx) => idx,
            None => {
                entry.receptions.push(ReceptionWithProducts {
                    reception: ReceptionResponse {
                        id: reception_row.id,
                        date_time: reception_row.date_time,
                        pvz_id: row.pvz_id,
                        status: reception_row.status,
                    },
                    products: Vec::new(),
                });
                entry.receptions.len() - 1
            }
        };

        if let Some(product_row) = row.product {
            entry.receptions[rec_idx].products.push(ProductResponse {
                id: product_row.id,
                date_time: product_row.date_time,
                product_type: product_row.product_type,
                reception_id: reception_row.id,
            });
        }
    }

    result
}
