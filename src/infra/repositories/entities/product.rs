//! SeaORM entity for the `products` table.

use sea_orm::entity::prelude::*;

use crate::domain::{Product, ProductType};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub date_time: DateTimeUtc,
    #[sea_orm(column_name = "type")]
    pub product_type: String,
    pub reception_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::reception::Entity",
        from = "Column::ReceptionId",
        to = "super::reception::Column::Id"
    )]
    Reception,
}

impl Related<super::reception::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reception.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Product {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Product {
            id: model.id,
            date_time: model.date_time,
            product_type: ProductType::parse(&model.product_type)?,
            reception_id: model.reception_id,
        })
    }
}
