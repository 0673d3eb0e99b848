use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000003_create_location_table::Location, m20260302_000005_create_car_table::Car,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CarLocation::Table)
                    .if_not_exists()
                    .col(integer(CarLocation::CarId))
                    .col(integer(CarLocation::LocationId))
                    .primary_key(
                        Index::create()
                            .col(CarLocation::CarId)
                            .col(CarLocation::LocationId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_car_location_car_id")
                            .from(CarLocation::Table, CarLocation::CarId)
                            .to(Car::Table, Car::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_car_location_location_id")
                            .from(CarLocation::Table, CarLocation::LocationId)
                            .to(Location::Table, Location::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CarLocation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CarLocation {
    Table,
    CarId,
    LocationId,
}
