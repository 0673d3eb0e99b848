//! Booking factory.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::BookingDependencies;

/// Factory for creating test bookings.
///
/// # Example
///
/// ```rust,ignore
/// let deps = create_booking_dependencies(&db).await?;
/// let booking = BookingFactory::from_dependencies(&db, &deps)
///     .status("void")
///     .expire_at(Some(Utc::now() - Duration::minutes(1)))
///     .build()
///     .await?;
/// ```
pub struct BookingFactory<'a> {
    db: &'a DatabaseConnection,
    supplier_id: i32,
    car_id: i32,
    driver_id: i32,
    pickup_location_id: i32,
    drop_off_location_id: i32,
    from_date: DateTime<Utc>,
    to_date: DateTime<Utc>,
    status: String,
    price: f64,
    cancellation: bool,
    additional_driver_id: Option<i32>,
    session_id: Option<String>,
    expire_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl<'a> BookingFactory<'a> {
    /// Defaults: three days starting tomorrow, status `"pending"`, price 150.
    pub fn new(
        db: &'a DatabaseConnection,
        supplier_id: i32,
        car_id: i32,
        driver_id: i32,
        location_id: i32,
    ) -> Self {
        let from_date = Utc::now() + Duration::days(1);
        Self {
            db,
            supplier_id,
            car_id,
            driver_id,
            pickup_location_id: location_id,
            drop_off_location_id: location_id,
            from_date,
            to_date: from_date + Duration::days(3),
            status: "pending".to_string(),
            price: 150.0,
            cancellation: false,
            additional_driver_id: None,
            session_id: None,
            expire_at: None,
            created_at: Utc::now(),
        }
    }

    /// Creates a factory wired to rows from `create_booking_dependencies`.
    pub fn from_dependencies(db: &'a DatabaseConnection, deps: &BookingDependencies) -> Self {
        Self::new(
            db,
            deps.supplier.id,
            deps.car.id,
            deps.driver.id,
            deps.location.id,
        )
    }

    pub fn driver(mut self, driver_id: i32) -> Self {
        self.driver_id = driver_id;
        self
    }

    pub fn dates(mut self, from_date: DateTime<Utc>, to_date: DateTime<Utc>) -> Self {
        self.from_date = from_date;
        self.to_date = to_date;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn cancellation(mut self, cancellation: bool) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn additional_driver_id(mut self, id: Option<i32>) -> Self {
        self.additional_driver_id = id;
        self
    }

    pub fn session_id(mut self, session_id: Option<String>) -> Self {
        self.session_id = session_id;
        self
    }

    pub fn expire_at(mut self, expire_at: Option<DateTime<Utc>>) -> Self {
        self.expire_at = expire_at;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn build(self) -> Result<entity::booking::Model, DbErr> {
        entity::booking::ActiveModel {
            id: ActiveValue::NotSet,
            supplier_id: ActiveValue::Set(self.supplier_id),
            car_id: ActiveValue::Set(self.car_id),
            driver_id: ActiveValue::Set(self.driver_id),
            pickup_location_id: ActiveValue::Set(self.pickup_location_id),
            drop_off_location_id: ActiveValue::Set(self.drop_off_location_id),
            from_date: ActiveValue::Set(self.from_date),
            to_date: ActiveValue::Set(self.to_date),
            status: ActiveValue::Set(self.status),
            cancellation: ActiveValue::Set(self.cancellation),
            amendments: ActiveValue::Set(false),
            theft_protection: ActiveValue::Set(false),
            collision_damage_waiver: ActiveValue::Set(false),
            full_insurance: ActiveValue::Set(false),
            additional_driver: ActiveValue::Set(self.additional_driver_id.is_some()),
            additional_driver_id: ActiveValue::Set(self.additional_driver_id),
            cancel_request: ActiveValue::Set(false),
            price: ActiveValue::Set(self.price),
            session_id: ActiveValue::Set(self.session_id),
            payment_intent_id: ActiveValue::Set(None),
            customer_id: ActiveValue::Set(None),
            expire_at: ActiveValue::Set(self.expire_at),
            is_deposit: ActiveValue::Set(false),
            is_payed_in_full: ActiveValue::Set(false),
            created_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an additional driver record.
pub async fn create_additional_driver(
    db: &DatabaseConnection,
) -> Result<entity::additional_driver::Model, DbErr> {
    entity::additional_driver::ActiveModel {
        id: ActiveValue::NotSet,
        full_name: ActiveValue::Set("Second Driver".to_string()),
        email: ActiveValue::Set("second.driver@test.local".to_string()),
        phone: ActiveValue::Set("+10000000000".to_string()),
        birth_date: ActiveValue::Set(
            chrono::NaiveDate::from_ymd_opt(1985, 6, 15).unwrap_or_default(),
        ),
    }
    .insert(db)
    .await
}
