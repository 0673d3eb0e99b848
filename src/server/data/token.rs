//! Activation and password reset tokens.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};

pub struct TokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a token for a user, valid until `expire_at`.
    pub async fn create(
        &self,
        user_id: i32,
        token: String,
        expire_at: DateTime<Utc>,
    ) -> Result<entity::token::Model, DbErr> {
        entity::token::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            token: ActiveValue::Set(token),
            expire_at: ActiveValue::Set(expire_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Checks that `token` was issued to `user_id` and has not expired at `now`.
    pub async fn is_valid(
        &self,
        user_id: i32,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::Token::find()
            .filter(entity::token::Column::UserId.eq(user_id))
            .filter(entity::token::Column::Token.eq(token))
            .filter(entity::token::Column::ExpireAt.gt(now))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Deletes every token of a user.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of deleted tokens
    pub async fn delete_by_user(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Token::delete_many()
            .filter(entity::token::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_by_users(&self, user_ids: Vec<i32>) -> Result<u64, DbErr> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Token::delete_many()
            .filter(entity::token::Column::UserId.is_in(user_ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes tokens that expired before `now`.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::Token::delete_many()
            .filter(entity::token::Column::ExpireAt.lt(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
