use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000003_create_location_table::Location;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingSpot::Table)
                    .if_not_exists()
                    .col(pk_auto(ParkingSpot::Id))
                    .col(integer(ParkingSpot::LocationId))
                    .col(string(ParkingSpot::Name))
                    .col(double(ParkingSpot::Latitude))
                    .col(double(ParkingSpot::Longitude))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_spot_location_id")
                            .from(ParkingSpot::Table, ParkingSpot::LocationId)
                            .to(Location::Table, Location::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParkingSpot::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ParkingSpot {
    Table,
    Id,
    LocationId,
    Name,
    Latitude,
    Longitude,
}
