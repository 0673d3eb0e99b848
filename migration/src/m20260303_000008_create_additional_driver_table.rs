use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdditionalDriver::Table)
                    .if_not_exists()
                    .col(pk_auto(AdditionalDriver::Id))
                    .col(string(AdditionalDriver::FullName))
                    .col(string(AdditionalDriver::Email))
                    .col(string(AdditionalDriver::Phone))
                    .col(date(AdditionalDriver::BirthDate))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdditionalDriver::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AdditionalDriver {
    Table,
    Id,
    FullName,
    Email,
    Phone,
    BirthDate,
}
