use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::notification::Notification;

/// Notification rows and the per-user unread counter.
///
/// Every write recomputes the counter from the notification rows, so it always equals
/// the number of unread notifications.
pub struct NotificationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an unread notification and bumps the counter of its user.
    pub async fn create(
        &self,
        user_id: i32,
        message: String,
        booking_id: Option<i32>,
    ) -> Result<Notification, DbErr> {
        let notification = entity::notification::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            message: ActiveValue::Set(message),
            booking_id: ActiveValue::Set(booking_id),
            is_read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.refresh_counter(user_id).await?;

        Ok(Notification::from_entity(notification))
    }

    /// Gets a user's notifications, newest first.
    ///
    /// # Returns
    /// - `Ok((notifications, total))` - Notifications of the requested page and total count
    pub async fn get_paginated(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Notification>, u64), DbErr> {
        let paginator = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .paginate(self.db, per_page.max(1));

        let total = paginator.num_items().await?;
        let notifications = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Notification::from_entity)
            .collect();

        Ok((notifications, total))
    }

    /// Unread count stored for a user; zero when no counter row exists yet.
    pub async fn get_counter(&self, user_id: i32) -> Result<i32, DbErr> {
        Ok(entity::prelude::NotificationCounter::find_by_id(user_id)
            .one(self.db)
            .await?
            .map(|c| c.count)
            .unwrap_or(0))
    }

    /// Marks notifications of a user as read or unread. Ids of other users are ignored.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of notifications updated
    pub async fn set_read(&self, user_id: i32, ids: Vec<i32>, is_read: bool) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Notification::update_many()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::Id.is_in(ids))
            .col_expr(
                entity::notification::Column::IsRead,
                sea_orm::sea_query::Expr::value(is_read),
            )
            .exec(self.db)
            .await?;

        self.refresh_counter(user_id).await?;

        Ok(result.rows_affected)
    }

    /// Deletes notifications of a user. Ids of other users are ignored.
    pub async fn delete(&self, user_id: i32, ids: Vec<i32>) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;

        self.refresh_counter(user_id).await?;

        Ok(result.rows_affected)
    }

    async fn refresh_counter(&self, user_id: i32) -> Result<(), DbErr> {
        let unread = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .count(self.db)
            .await?;

        entity::prelude::NotificationCounter::insert(entity::notification_counter::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            count: ActiveValue::Set(unread as i32),
        })
        .on_conflict(
            OnConflict::column(entity::notification_counter::Column::UserId)
                .update_column(entity::notification_counter::Column::Count)
                .to_owned(),
        )
        .exec(self.db)
        .await?;

        Ok(())
    }
}
