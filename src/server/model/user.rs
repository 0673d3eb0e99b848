//! User domain models and parameters.
//!
//! Admins, suppliers and customers share one table. Provides the domain model with a
//! parsed `UserType`, parameter types for account creation, profile updates and
//! searches, and the paginated result type.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    model::{
        enums::UserType,
        supplier::{SupplierSummaryDto, UpdateSupplierDto},
        user::{CreateUserDto, PaginatedUsersDto, SignUpDto, UpdateUserDto, UserDto},
    },
    server::{error::AppError, util::parse::parse_stored},
};

/// Account of an admin, a supplier or a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub user_type: UserType,
    pub full_name: String,
    /// Lower-cased email address, unique across accounts.
    pub email: String,
    pub phone: Option<String>,
    /// Argon2 PHC string. `None` until the account is activated.
    pub password: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
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
    /// Percentage applied to every price computed for this supplier's cars.
    pub price_change_rate: Option<f64>,
    pub supplier_car_limit: Option<i32>,
    pub notify_admin_on_new_car: bool,
    /// Deadline for activating a self signed-up account; purged afterwards.
    pub expire_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(AppError::InternalErr)` - The stored user type is unknown
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            user_type: parse_stored("user.user_type", &entity.user_type)?,
            full_name: entity.full_name,
            email: entity.email,
            phone: entity.phone,
            password: entity.password,
            birth_date: entity.birth_date,
            verified: entity.verified,
            verified_at: entity.verified_at,
            active: entity.active,
            language: entity.language,
            enable_email_notifications: entity.enable_email_notifications,
            avatar: entity.avatar,
            bio: entity.bio,
            location: entity.location,
            blacklisted: entity.blacklisted,
            pay_later: entity.pay_later,
            license_required: entity.license_required,
            license: entity.license,
            minimum_rental_days: entity.minimum_rental_days,
            price_change_rate: entity.price_change_rate,
            supplier_car_limit: entity.supplier_car_limit,
            notify_admin_on_new_car: entity.notify_admin_on_new_car,
            expire_at: entity.expire_at,
            created_at: entity.created_at,
        })
    }

    /// Converts the user to a DTO. The password hash never leaves the server.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            user_type: self.user_type,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            birth_date: self.birth_date,
            verified: self.verified,
            active: self.active,
            language: self.language,
            enable_email_notifications: self.enable_email_notifications,
            avatar: self.avatar,
            bio: self.bio,
            location: self.location,
            blacklisted: self.blacklisted,
            pay_later: self.pay_later,
            license_required: self.license_required,
            license: self.license,
            minimum_rental_days: self.minimum_rental_days,
            price_change_rate: self.price_change_rate,
            supplier_car_limit: self.supplier_car_limit,
            notify_admin_on_new_car: self.notify_admin_on_new_car,
            created_at: self.created_at,
        }
    }

    pub fn into_summary_dto(self) -> SupplierSummaryDto {
        SupplierSummaryDto {
            id: self.id,
            full_name: self.full_name,
            avatar: self.avatar,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }

    pub fn is_supplier(&self) -> bool {
        self.user_type == UserType::Supplier
    }

    /// Whether the account was created by a guest checkout and never activated:
    /// no password yet and still due to expire.
    pub fn is_checkout_guest(&self) -> bool {
        !self.verified && self.password.is_none() && self.expire_at.is_some()
    }
}

/// Paginated collection of users with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.users.into_iter().map(User::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Parameters for inserting an account.
///
/// Built by the sign-up, admin sign-up, user creation and checkout flows. The email
/// must already be normalized and the password already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub user_type: UserType,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub language: String,
    pub verified: bool,
    /// Stored file name. For accounts created from the back-office this is the name
    /// of a temporary upload, promoted once the account exists.
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    /// Same convention as `avatar`.
    pub license: Option<String>,
    pub pay_later: bool,
    pub license_required: bool,
    pub minimum_rental_days: Option<i32>,
    pub price_change_rate: Option<f64>,
    pub supplier_car_limit: Option<i32>,
    pub notify_admin_on_new_car: bool,
    pub expire_at: Option<DateTime<Utc>>,
}

impl CreateUserParams {
    /// Customer account with every optional field unset.
    pub fn customer(full_name: String, email: String, language: String) -> Self {
        Self {
            user_type: UserType::User,
            full_name,
            email,
            phone: None,
            password: None,
            birth_date: None,
            language,
            verified: false,
            avatar: None,
            bio: None,
            location: None,
            license: None,
            pay_later: false,
            license_required: false,
            minimum_rental_days: None,
            price_change_rate: None,
            supplier_car_limit: None,
            notify_admin_on_new_car: false,
            expire_at: None,
        }
    }

    /// Account created from the back-office, without a password.
    pub fn from_dto(dto: CreateUserDto, default_language: &str) -> Self {
        Self {
            user_type: dto.user_type,
            full_name: dto.full_name.trim().to_string(),
            email: dto.email,
            phone: dto.phone,
            password: None,
            birth_date: dto.birth_date,
            language: dto
                .language
                .unwrap_or_else(|| default_language.to_string()),
            verified: false,
            avatar: dto.avatar,
            bio: dto.bio,
            location: dto.location,
            license: dto.license,
            pay_later: dto.pay_later,
            license_required: dto.license_required,
            minimum_rental_days: dto.minimum_rental_days,
            price_change_rate: dto.price_change_rate,
            supplier_car_limit: dto.supplier_car_limit,
            notify_admin_on_new_car: dto.notify_admin_on_new_car,
            expire_at: None,
        }
    }
}

/// Self sign-up of a customer, or of the first admin.
#[derive(Debug, Clone)]
pub struct SignUpParams {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub language: Option<String>,
}

impl SignUpParams {
    pub fn from_dto(dto: SignUpDto) -> Self {
        Self {
            full_name: dto.full_name,
            email: dto.email,
            password: dto.password,
            birth_date: dto.birth_date,
            phone: dto.phone,
            language: dto.language,
        }
    }
}

/// Profile update. `None` leaves optional settings unchanged.
#[derive(Debug, Clone)]
pub struct UpdateUserParams {
    pub id: i32,
    pub full_name: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub language: Option<String>,
    pub enable_email_notifications: Option<bool>,
    pub user_type: Option<UserType>,
    pub blacklisted: Option<bool>,
    pub pay_later: Option<bool>,
}

impl UpdateUserParams {
    pub fn from_dto(id: i32, dto: UpdateUserDto) -> Self {
        Self {
            id,
            full_name: dto.full_name.trim().to_string(),
            phone: dto.phone,
            birth_date: dto.birth_date,
            bio: dto.bio,
            location: dto.location,
            language: dto.language,
            enable_email_notifications: dto.enable_email_notifications,
            user_type: dto.user_type,
            blacklisted: dto.blacklisted,
            pay_later: dto.pay_later,
        }
    }
}

/// Supplier specific settings editable from the back-office.
#[derive(Debug, Clone)]
pub struct UpdateSupplierParams {
    pub id: i32,
    pub full_name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub pay_later: bool,
    pub license_required: bool,
    pub minimum_rental_days: Option<i32>,
    pub price_change_rate: Option<f64>,
    pub supplier_car_limit: Option<i32>,
    pub notify_admin_on_new_car: bool,
}

impl UpdateSupplierParams {
    pub fn from_dto(id: i32, dto: UpdateSupplierDto) -> Self {
        Self {
            id,
            full_name: dto.full_name.trim().to_string(),
            phone: dto.phone,
            location: dto.location,
            bio: dto.bio,
            pay_later: dto.pay_later,
            license_required: dto.license_required,
            minimum_rental_days: dto.minimum_rental_days,
            price_change_rate: dto.price_change_rate,
            supplier_car_limit: dto.supplier_car_limit,
            notify_admin_on_new_car: dto.notify_admin_on_new_car,
        }
    }
}

/// Parameters for the paginated user search.
#[derive(Debug, Clone, Default)]
pub struct UserSearchParams {
    /// Empty means every type.
    pub user_types: Vec<UserType>,
    /// Matched against full name and email.
    pub keyword: Option<String>,
    /// Only customers that booked at least once with this supplier.
    pub customers_of_supplier: Option<i32>,
    /// Account left out of the results, typically the caller.
    pub exclude_user_id: Option<i32>,
    pub page: u64,
    pub per_page: u64,
}
