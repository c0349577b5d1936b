//! SeaORM entity for the `pvz` table.

use sea_orm::entity::prelude::*;

use crate::domain::{City, Pvz};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pvz")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub registration_date: DateTimeUtc,
    pub city: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reception::Entity")]
    Reception,
}

impl Related<super::reception::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reception.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Pvz {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Pvz {
            id: model.id,
            registration_date: model.registration_date,
            city: City::parse(&model.city)?,
        })
    }
}
