//! Migration: Create pickup point, reception, and product tables.
//!
//! The partial unique index on receptions is the storage-level
//! enforcement of the at-most-one-active-reception invariant; SeaQL
//! has no builder for partial indexes, so it is created with raw SQL.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pvz::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Pvz::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Pvz::RegistrationDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Pvz::City).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Receptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Receptions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Receptions::DateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Receptions::PvzId).uuid().not_null())
                    .col(ColumnDef::new(Receptions::Status).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_receptions_pvz")
                            .from(Receptions::Table, Receptions::PvzId)
                            .to(Pvz::Table, Pvz::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one in-progress reception per pickup point; concurrent
        // opens race on this index, not on an application-level check.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX uq_receptions_active_per_pvz \
                 ON receptions (pvz_id) WHERE status = 'in_progress'",
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Products::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Products::DateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Products::Type).string().not_null())
                    .col(ColumnDef::new(Products::ReceptionId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_reception")
                            .from(Products::Table, Products::ReceptionId)
                            .to(Receptions::Table, Receptions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // LIFO removal scans products of one reception by recency.
        manager
            .create_index(
                Index::create()
                    .name("idx_products_reception_date_time")
                    .table(Products::Table)
                    .col(Products::ReceptionId)
                    .col(Products::DateTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Receptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pvz::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Pvz {
    Table,
    Id,
    RegistrationDate,
    City,
}

#[derive(Iden)]
enum Receptions {
    Table,
    Id,
    DateTime,
    PvzId,
    Status,
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
    DateTime,
    Type,
    ReceptionId,
}
