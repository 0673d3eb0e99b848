use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000001_create_user_table::User, m20260301_000002_create_country_table::Country,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Location::Table)
                    .if_not_exists()
                    .col(pk_auto(Location::Id))
                    .col(integer(Location::CountryId))
                    .col(string_uniq(Location::Name))
                    .col(double_null(Location::Latitude))
                    .col(double_null(Location::Longitude))
                    .col(string_null(Location::Image))
                    .col(integer_null(Location::SupplierId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_location_country_id")
                            .from(Location::Table, Location::CountryId)
                            .to(Country::Table, Country::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_location_supplier_id")
                            .from(Location::Table, Location::SupplierId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Location::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Location {
    Table,
    Id,
    CountryId,
    Name,
    Latitude,
    Longitude,
    Image,
    SupplierId,
}
