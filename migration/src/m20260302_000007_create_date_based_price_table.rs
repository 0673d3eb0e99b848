use sea_orm_migration::{prelude::*, schema::*};

use super::m20260302_000005_create_car_table::Car;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DateBasedPrice::Table)
                    .if_not_exists()
                    .col(pk_auto(DateBasedPrice::Id))
                    .col(integer(DateBasedPrice::CarId))
                    .col(date(DateBasedPrice::StartDate))
                    .col(date(DateBasedPrice::EndDate))
                    .col(double(DateBasedPrice::DailyPrice))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_date_based_price_car_id")
                            .from(DateBasedPrice::Table, DateBasedPrice::CarId)
                            .to(Car::Table, Car::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DateBasedPrice::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DateBasedPrice {
    Table,
    Id,
    CarId,
    StartDate,
    EndDate,
    DailyPrice,
}
