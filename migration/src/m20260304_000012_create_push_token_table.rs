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
                    .table(PushToken::Table)
                    .if_not_exists()
                    .col(pk_auto(PushToken::Id))
                    .col(integer_uniq(PushToken::UserId))
                    .col(string(PushToken::Token))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_push_token_user_id")
                            .from(PushToken::Table, PushToken::UserId)
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
            .drop_table(Table::drop().table(PushToken::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PushToken {
    Table,
    Id,
    UserId,
    Token,
}
