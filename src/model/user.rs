use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::enums::{App, UserType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub user_type: UserType,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub verified: bool,
    pub active: bool,
    pub language: String,
    pub enable_email_notifications: bool,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub blacklisted: bool,
    pub pay_later: bool,
    pub license_required: bool,
    pub license: Option<String>,
    pub minimum_rental_days: Option<i32>,
    pub price_change_rate: Option<f64>,
    pub supplier_car_limit: Option<i32>,
    pub notify_admin_on_new_car: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedUsersDto {
    pub users: Vec<UserDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// Customer self sign-up.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignUpDto {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignInDto {
    pub email: String,
    pub password: String,
    pub app: App,
}

/// Account created by an admin (any type) or a supplier (customers only).
///
/// The account has no password; an activation link is mailed to the address.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserDto {
    pub user_type: UserType,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub language: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    /// Name of a previously uploaded temporary avatar.
    pub avatar: Option<String>,
    /// Name of a previously uploaded temporary license document.
    pub license: Option<String>,
    #[serde(default)]
    pub pay_later: bool,
    #[serde(default)]
    pub license_required: bool,
    pub minimum_rental_days: Option<i32>,
    pub price_change_rate: Option<f64>,
    pub supplier_car_limit: Option<i32>,
    #[serde(default)]
    pub notify_admin_on_new_car: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserDto {
    pub full_name: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub language: Option<String>,
    pub enable_email_notifications: Option<bool>,
    /// Only honoured when an admin updates the account.
    pub user_type: Option<UserType>,
    /// Only honoured when an admin updates the account.
    pub blacklisted: Option<bool>,
    pub pay_later: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivateDto {
    pub user_id: i32,
    pub token: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckTokenDto {
    pub user_id: i32,
    pub email: String,
    pub token: String,
}

/// Re-sends the activation link or, when `reset` is set, a password reset link.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResendDto {
    pub email: String,
    #[serde(default)]
    pub reset: bool,
    pub app: App,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConfirmEmailDto {
    pub email: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidateEmailDto {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChangePasswordDto {
    /// Current password; required unless an admin changes another user's password.
    pub password: Option<String>,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckPasswordDto {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmailNotificationsDto {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LanguageDto {
    pub language: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UserSearchDto {
    #[serde(default)]
    pub user_types: Vec<UserType>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "crate::model::api::default_entries")]
    pub entries: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PushTokenDto {
    pub token: String,
}

/// Contact form submission forwarded to the admin mailbox.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactDto {
    pub from: String,
    pub subject: String,
    pub message: String,
}
