//! SeaORM entity for the `receptions` table.
//!
//! A partial unique index on `(pvz_id) WHERE status = 'in_progress'`
//! (created in the migrations) enforces the one-active-reception
//! invariant at the storage layer.

use sea_orm::entity::prelude::*;

use crate::domain::{Reception, ReceptionStatus};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "receptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub date_time: DateTimeUtc,
    pub pvz_id: Uuid,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pvz::Entity",
        from = "Column::PvzId",
        to = "super::pvz::Column::Id"
    )]
    Pvz,
    #[sea_orm(has_many = "super::product::Entity")]
    Product,
}

impl Related<super::pvz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pvz.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Reception {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Reception {
            id: model.id,
            date_time: model.date_time,
            pvz_id: model.pvz_id,
            status: ReceptionStatus::parse(&model.status)?,
        })
    }
}
