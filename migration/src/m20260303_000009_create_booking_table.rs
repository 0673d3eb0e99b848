use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000001_create_user_table::User, m20260301_000003_create_location_table::Location,
    m20260302_000005_create_car_table::Car,
    m20260303_000008_create_additional_driver_table::AdditionalDriver,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(pk_auto(Booking::Id))
                    .col(integer(Booking::SupplierId))
                    .col(integer(Booking::CarId))
                    .col(integer(Booking::DriverId))
                    .col(integer(Booking::PickupLocationId))
                    .col(integer(Booking::DropOffLocationId))
                    .col(timestamp_with_time_zone(Booking::FromDate))
                    .col(timestamp_with_time_zone(Booking::ToDate))
                    .col(string(Booking::Status))
                    .col(boolean(Booking::Cancellation).default(false))
                    .col(boolean(Booking::Amendments).default(false))
                    .col(boolean(Booking::TheftProtection).default(false))
                    .col(boolean(Booking::CollisionDamageWaiver).default(false))
                    .col(boolean(Booking::FullInsurance).default(false))
                    .col(boolean(Booking::AdditionalDriver).default(false))
                    .col(integer_null(Booking::AdditionalDriverId))
                    .col(boolean(Booking::CancelRequest).default(false))
                    .col(double(Booking::Price))
                    .col(string_null(Booking::SessionId))
                    .col(string_null(Booking::PaymentIntentId))
                    .col(string_null(Booking::CustomerId))
                    .col(timestamp_with_time_zone_null(Booking::ExpireAt))
                    .col(boolean(Booking::IsDeposit).default(false))
                    .col(boolean(Booking::IsPayedInFull).default(false))
                    .col(
                        timestamp_with_time_zone(Booking::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_supplier_id")
                            .from(Booking::Table, Booking::SupplierId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_driver_id")
                            .from(Booking::Table, Booking::DriverId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_car_id")
                            .from(Booking::Table, Booking::CarId)
                            .to(Car::Table, Car::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_pickup_location_id")
                            .from(Booking::Table, Booking::PickupLocationId)
                            .to(Location::Table, Location::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_drop_off_location_id")
                            .from(Booking::Table, Booking::DropOffLocationId)
                            .to(Location::Table, Location::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_additional_driver_id")
                            .from(Booking::Table, Booking::AdditionalDriverId)
                            .to(AdditionalDriver::Table, AdditionalDriver::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_booking_supplier_id", Booking::SupplierId),
            ("idx_booking_car_id", Booking::CarId),
            ("idx_booking_driver_id", Booking::DriverId),
            ("idx_booking_session_id", Booking::SessionId),
            ("idx_booking_expire_at", Booking::ExpireAt),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Booking::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    SupplierId,
    CarId,
    DriverId,
    PickupLocationId,
    DropOffLocationId,
    FromDate,
    ToDate,
    Status,
    Cancellation,
    Amendments,
    TheftProtection,
    CollisionDamageWaiver,
    FullInsurance,
    AdditionalDriver,
    AdditionalDriverId,
    CancelRequest,
    Price,
    SessionId,
    PaymentIntentId,
    CustomerId,
    ExpireAt,
    IsDeposit,
    IsPayedInFull,
    CreatedAt,
}
