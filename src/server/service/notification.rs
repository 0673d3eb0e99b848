//! In-app notifications and their email and push fan-out.

use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::server::{
    data::{
        notification::NotificationRepository, push_token::PushTokenRepository,
        user::UserRepository,
    },
    error::AppError,
    model::{
        notification::{Notification, PaginatedNotifications},
        page_count,
        user::User,
    },
    service::{
        mail::{layout, Email, Mailer},
        push::{PushMessage, PushService},
    },
    util::html::escape_html,
};

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
    mailer: &'a Mailer,
    push: &'a PushService,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection, mailer: &'a Mailer, push: &'a PushService) -> Self {
        Self { db, mailer, push }
    }

    /// Notifies a user in-app, then by email and push according to their settings.
    ///
    /// The notification row and the counter are written first. Email and push are
    /// best effort: failures are logged and do not fail the call.
    ///
    /// # Arguments
    /// - `user` - Recipient
    /// - `subject` - Email subject and push title
    /// - `message` - Notification text
    /// - `booking_id` - Booking the notification is about, if any
    pub async fn notify(
        &self,
        user: &User,
        subject: &str,
        message: String,
        booking_id: Option<i32>,
    ) -> Result<Notification, AppError> {
        let notification = NotificationRepository::new(self.db)
            .create(user.id, message.clone(), booking_id)
            .await?;

        if user.enable_email_notifications {
            let email = Email {
                to: user.email.clone(),
                subject: subject.to_string(),
                html: layout(
                    &format!("Hello {},", escape_html(&user.full_name)),
                    &[escape_html(&message)],
                ),
            };

            if let Err(e) = self.mailer.send(&email).await {
                tracing::warn!("Failed to email notification to user {}: {}", user.id, e);
            }
        }

        if let Some(token) = PushTokenRepository::new(self.db).get(user.id).await? {
            let push = PushMessage {
                to: token,
                title: subject.to_string(),
                body: message,
                data: booking_id.map(|id| json!({ "booking_id": id })),
            };

            if let Err(e) = self.push.send(vec![push]).await {
                tracing::warn!("Failed to push notification to user {}: {}", user.id, e);
            }
        }

        Ok(notification)
    }

    /// Sends the same notification to every admin.
    pub async fn notify_admins(
        &self,
        subject: &str,
        message: &str,
        booking_id: Option<i32>,
    ) -> Result<(), AppError> {
        let admins = UserRepository::new(self.db).get_admins().await?;

        for admin in &admins {
            self.notify(admin, subject, message.to_string(), booking_id)
                .await?;
        }

        Ok(())
    }

    pub async fn get_paginated(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedNotifications, AppError> {
        let (notifications, total) = NotificationRepository::new(self.db)
            .get_paginated(user_id, page, per_page)
            .await?;

        Ok(PaginatedNotifications {
            notifications,
            total,
            page,
            per_page,
            total_pages: page_count(total, per_page),
        })
    }

    pub async fn get_counter(&self, user_id: i32) -> Result<i32, AppError> {
        Ok(NotificationRepository::new(self.db)
            .get_counter(user_id)
            .await?)
    }

    /// Marks notifications read or unread and returns the new unread count.
    pub async fn set_read(
        &self,
        user_id: i32,
        ids: Vec<i32>,
        is_read: bool,
    ) -> Result<i32, AppError> {
        let repo = NotificationRepository::new(self.db);
        repo.set_read(user_id, ids, is_read).await?;

        Ok(repo.get_counter(user_id).await?)
    }

    /// Deletes notifications and returns the new unread count.
    pub async fn delete(&self, user_id: i32, ids: Vec<i32>) -> Result<i32, AppError> {
        let repo = NotificationRepository::new(self.db);
        repo.delete(user_id, ids).await?;

        Ok(repo.get_counter(user_id).await?)
    }
}
