//! User factory for creating customers, suppliers and admins.

use crate::factory::helpers::next_id;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let supplier = UserFactory::new(&db)
///     .user_type("supplier")
///     .full_name("Rent A Car")
///     .pay_later(true)
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    user_type: String,
    full_name: String,
    email: String,
    password: Option<String>,
    birth_date: Option<NaiveDate>,
    verified: bool,
    active: bool,
    language: String,
    enable_email_notifications: bool,
    blacklisted: bool,
    pay_later: bool,
    minimum_rental_days: Option<i32>,
    price_change_rate: Option<f64>,
    supplier_car_limit: Option<i32>,
    notify_admin_on_new_car: bool,
    expire_at: Option<DateTime<Utc>>,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - user_type: `"user"`
    /// - full_name: `"User {id}"`, email: `"user{id}@test.local"`
    /// - birth_date: 1990-01-01
    /// - verified, active, email notifications: `true`
    /// - no password, no expiry
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            user_type: "user".to_string(),
            full_name: format!("User {}", id),
            email: format!("user{}@test.local", id),
            password: None,
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1),
            verified: true,
            active: true,
            language: "en".to_string(),
            enable_email_notifications: true,
            blacklisted: false,
            pay_later: false,
            minimum_rental_days: None,
            price_change_rate: None,
            supplier_car_limit: None,
            notify_admin_on_new_car: false,
            expire_at: None,
        }
    }

    pub fn user_type(mut self, user_type: impl Into<String>) -> Self {
        self.user_type = user_type.into();
        self
    }

    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the stored password hash (not the plain password).
    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password = Some(hash.into());
        self
    }

    pub fn birth_date(mut self, birth_date: Option<NaiveDate>) -> Self {
        self.birth_date = birth_date;
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn enable_email_notifications(mut self, enabled: bool) -> Self {
        self.enable_email_notifications = enabled;
        self
    }

    pub fn blacklisted(mut self, blacklisted: bool) -> Self {
        self.blacklisted = blacklisted;
        self
    }

    pub fn pay_later(mut self, pay_later: bool) -> Self {
        self.pay_later = pay_later;
        self
    }

    pub fn minimum_rental_days(mut self, days: Option<i32>) -> Self {
        self.minimum_rental_days = days;
        self
    }

    pub fn price_change_rate(mut self, rate: Option<f64>) -> Self {
        self.price_change_rate = rate;
        self
    }

    pub fn supplier_car_limit(mut self, limit: Option<i32>) -> Self {
        self.supplier_car_limit = limit;
        self
    }

    pub fn notify_admin_on_new_car(mut self, notify: bool) -> Self {
        self.notify_admin_on_new_car = notify;
        self
    }

    pub fn expire_at(mut self, expire_at: Option<DateTime<Utc>>) -> Self {
        self.expire_at = expire_at;
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            id: ActiveValue::NotSet,
            user_type: ActiveValue::Set(self.user_type),
            full_name: ActiveValue::Set(self.full_name),
            email: ActiveValue::Set(self.email),
            phone: ActiveValue::Set(None),
            password: ActiveValue::Set(self.password),
            birth_date: ActiveValue::Set(self.birth_date),
            verified: ActiveValue::Set(self.verified),
            verified_at: ActiveValue::Set(self.verified.then(Utc::now)),
            active: ActiveValue::Set(self.active),
            language: ActiveValue::Set(self.language),
            enable_email_notifications: ActiveValue::Set(self.enable_email_notifications),
            avatar: ActiveValue::Set(None),
            bio: ActiveValue::Set(None),
            location: ActiveValue::Set(None),
            blacklisted: ActiveValue::Set(self.blacklisted),
            pay_later: ActiveValue::Set(self.pay_later),
            license_required: ActiveValue::Set(false),
            license: ActiveValue::Set(None),
            minimum_rental_days: ActiveValue::Set(self.minimum_rental_days),
            price_change_rate: ActiveValue::Set(self.price_change_rate),
            supplier_car_limit: ActiveValue::Set(self.supplier_car_limit),
            notify_admin_on_new_car: ActiveValue::Set(self.notify_admin_on_new_car),
            expire_at: ActiveValue::Set(self.expire_at),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a verified customer with default values.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates a verified supplier with default values.
pub async fn create_supplier(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    let id = next_id();
    UserFactory::new(db)
        .user_type("supplier")
        .full_name(format!("Supplier {}", id))
        .build()
        .await
}

/// Creates a verified admin with default values.
pub async fn create_admin(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).user_type("admin").build().await
}
