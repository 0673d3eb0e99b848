use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Car::Table)
                    .if_not_exists()
                    .col(pk_auto(Car::Id))
                    .col(integer(Car::SupplierId))
                    .col(string(Car::Name))
                    .col(integer(Car::MinimumAge))
                    .col(double(Car::DailyPrice))
                    .col(double_null(Car::DiscountedDailyPrice))
                    .col(double_null(Car::BiWeeklyPrice))
                    .col(double_null(Car::DiscountedBiWeeklyPrice))
                    .col(double_null(Car::WeeklyPrice))
                    .col(double_null(Car::DiscountedWeeklyPrice))
                    .col(double_null(Car::MonthlyPrice))
                    .col(double_null(Car::DiscountedMonthlyPrice))
                    .col(double(Car::Deposit).default(0.0))
                    .col(boolean(Car::Available).default(true))
                    .col(boolean(Car::FullyBooked).default(false))
                    .col(boolean(Car::ComingSoon).default(false))
                    .col(string(Car::CarType))
                    .col(string(Car::Gearbox))
                    .col(boolean(Car::Aircon).default(false))
                    .col(string_null(Car::Image))
                    .col(integer(Car::Seats))
                    .col(integer(Car::Doors))
                    .col(string(Car::FuelPolicy))
                    .col(integer(Car::Mileage))
                    .col(double(Car::Cancellation))
                    .col(double(Car::Amendments))
                    .col(double(Car::TheftProtection))
                    .col(double(Car::CollisionDamageWaiver))
                    .col(double(Car::FullInsurance))
                    .col(double(Car::AdditionalDriver))
                    .col(string(Car::Range))
                    .col(string(Car::Multimedia).default(""))
                    .col(double_null(Car::Rating))
                    .col(double_null(Car::Co2))
                    .col(integer(Car::Trips).default(0))
                    .col(boolean(Car::IsDateBasedPrice).default(false))
                    .col(
                        timestamp_with_time_zone(Car::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_car_supplier_id")
                            .from(Car::Table, Car::SupplierId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_car_supplier_id")
                    .table(Car::Table)
                    .col(Car::SupplierId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Car::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Car {
    Table,
    Id,
    SupplierId,
    Name,
    MinimumAge,
    DailyPrice,
    DiscountedDailyPrice,
    BiWeeklyPrice,
    DiscountedBiWeeklyPrice,
    WeeklyPrice,
    DiscountedWeeklyPrice,
    MonthlyPrice,
    DiscountedMonthlyPrice,
    Deposit,
    Available,
    FullyBooked,
    ComingSoon,
    CarType,
    Gearbox,
    Aircon,
    Image,
    Seats,
    Doors,
    FuelPolicy,
    Mileage,
    Cancellation,
    Amendments,
    TheftProtection,
    CollisionDamageWaiver,
    FullInsurance,
    AdditionalDriver,
    Range,
    Multimedia,
    Rating,
    Co2,
    Trips,
    IsDateBasedPrice,
    CreatedAt,
}
