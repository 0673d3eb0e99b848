//! Mobile push tokens, at most one per user.

use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

pub struct PushTokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PushTokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<String>, DbErr> {
        let entity = entity::prelude::PushToken::find()
            .filter(entity::push_token::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(|t| t.token))
    }

    /// Stores the user's push token, replacing any previous one.
    pub async fn upsert(&self, user_id: i32, token: String) -> Result<(), DbErr> {
        entity::prelude::PushToken::insert(entity::push_token::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            token: ActiveValue::Set(token),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::push_token::Column::UserId)
                .update_column(entity::push_token::Column::Token)
                .to_owned(),
        )
        .exec(self.db)
        .await?;

        Ok(())
    }

    /// Removes the user's push token.
    ///
    /// # Returns
    /// - `Ok(true)` - A token was removed
    /// - `Ok(false)` - The user had no token
    pub async fn delete(&self, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::PushToken::delete_many()
            .filter(entity::push_token::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
