use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000001_create_user_table::User, m20260303_000009_create_booking_table::Booking,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .if_not_exists()
                    .col(pk_auto(Notification::Id))
                    .col(integer(Notification::UserId))
                    .col(text(Notification::Message))
                    .col(integer_null(Notification::BookingId))
                    .col(boolean(Notification::IsRead).default(false))
                    .col(
                        timestamp_with_time_zone(Notification::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_user_id")
                            .from(Notification::Table, Notification::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_booking_id")
                            .from(Notification::Table, Notification::BookingId)
                            .to(Booking::Table, Booking::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NotificationCounter::Table)
                    .if_not_exists()
                    .col(integer(NotificationCounter::UserId).primary_key())
                    .col(integer(NotificationCounter::Count).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_counter_user_id")
                            .from(NotificationCounter::Table, NotificationCounter::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NotificationCounter::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Notification {
    Table,
    Id,
    UserId,
    Message,
    BookingId,
    IsRead,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum NotificationCounter {
    Table,
    UserId,
    Count,
}
