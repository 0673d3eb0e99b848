//! Notification domain models.

use chrono::{DateTime, Utc};

use crate::model::notification::{NotificationDto, PaginatedNotificationsDto};

/// In-app message addressed to one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub message: String,
    pub booking_id: Option<i32>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn from_entity(entity: entity::notification::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            message: entity.message,
            booking_id: entity.booking_id,
            is_read: entity.is_read,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            user_id: self.user_id,
            message: self.message,
            booking_id: self.booking_id,
            is_read: self.is_read,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedNotifications {
    pub notifications: Vec<Notification>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedNotifications {
    pub fn into_dto(self) -> PaginatedNotificationsDto {
        PaginatedNotificationsDto {
            notifications: self
                .notifications
                .into_iter()
                .map(Notification::into_dto)
                .collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
