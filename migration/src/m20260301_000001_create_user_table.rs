use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string(User::UserType))
                    .col(string(User::FullName))
                    .col(string_uniq(User::Email))
                    .col(string_null(User::Phone))
                    .col(string_null(User::Password))
                    .col(date_null(User::BirthDate))
                    .col(boolean(User::Verified).default(false))
                    .col(timestamp_with_time_zone_null(User::VerifiedAt))
                    .col(boolean(User::Active).default(false))
                    .col(string(User::Language))
                    .col(boolean(User::EnableEmailNotifications).default(true))
                    .col(string_null(User::Avatar))
                    .col(text_null(User::Bio))
                    .col(string_null(User::Location))
                    .col(boolean(User::Blacklisted).default(false))
                    .col(boolean(User::PayLater).default(false))
                    .col(boolean(User::LicenseRequired).default(false))
                    .col(string_null(User::License))
                    .col(integer_null(User::MinimumRentalDays))
                    .col(double_null(User::PriceChangeRate))
                    .col(integer_null(User::SupplierCarLimit))
                    .col(boolean(User::NotifyAdminOnNewCar).default(false))
                    .col(timestamp_with_time_zone_null(User::ExpireAt))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_expire_at")
                    .table(User::Table)
                    .col(User::ExpireAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    UserType,
    FullName,
    Email,
    Phone,
    Password,
    BirthDate,
    Verified,
    VerifiedAt,
    Active,
    Language,
    EnableEmailNotifications,
    Avatar,
    Bio,
    Location,
    Blacklisted,
    PayLater,
    LicenseRequired,
    License,
    MinimumRentalDays,
    PriceChangeRate,
    SupplierCarLimit,
    NotifyAdminOnNewCar,
    ExpireAt,
    CreatedAt,
}
