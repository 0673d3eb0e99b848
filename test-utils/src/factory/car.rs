//! Car factory for creating test cars and their location links.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test cars with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let car = CarFactory::new(&db, supplier.id)
///     .daily_price(50.0)
///     .weekly_price(Some(300.0))
///     .locations(vec![location.id])
///     .build()
///     .await?;
/// ```
pub struct CarFactory<'a> {
    db: &'a DatabaseConnection,
    supplier_id: i32,
    name: String,
    minimum_age: i32,
    daily_price: f64,
    weekly_price: Option<f64>,
    monthly_price: Option<f64>,
    deposit: f64,
    available: bool,
    coming_soon: bool,
    car_type: String,
    gearbox: String,
    seats: i32,
    mileage: i32,
    cancellation: f64,
    theft_protection: f64,
    additional_driver: f64,
    range: String,
    multimedia: String,
    rating: Option<f64>,
    locations: Vec<i32>,
}

impl<'a> CarFactory<'a> {
    /// Creates a new CarFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Car {id}"`, minimum age 21, daily price 50, deposit 500
    /// - available, diesel, manual, 5 seats, unlimited mileage, midi range
    /// - cancellation 20 (flat), theft protection 10 (daily), additional driver 5 (daily)
    /// - no locations
    pub fn new(db: &'a DatabaseConnection, supplier_id: i32) -> Self {
        Self {
            db,
            supplier_id,
            name: format!("Car {}", next_id()),
            minimum_age: 21,
            daily_price: 50.0,
            weekly_price: None,
            monthly_price: None,
            deposit: 500.0,
            available: true,
            coming_soon: false,
            car_type: "diesel".to_string(),
            gearbox: "manual".to_string(),
            seats: 5,
            mileage: -1,
            cancellation: 20.0,
            theft_protection: 10.0,
            additional_driver: 5.0,
            range: "midi".to_string(),
            multimedia: String::new(),
            rating: None,
            locations: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn minimum_age(mut self, minimum_age: i32) -> Self {
        self.minimum_age = minimum_age;
        self
    }

    pub fn daily_price(mut self, price: f64) -> Self {
        self.daily_price = price;
        self
    }

    pub fn weekly_price(mut self, price: Option<f64>) -> Self {
        self.weekly_price = price;
        self
    }

    pub fn monthly_price(mut self, price: Option<f64>) -> Self {
        self.monthly_price = price;
        self
    }

    pub fn deposit(mut self, deposit: f64) -> Self {
        self.deposit = deposit;
        self
    }

    pub fn available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    pub fn coming_soon(mut self, coming_soon: bool) -> Self {
        self.coming_soon = coming_soon;
        self
    }

    pub fn car_type(mut self, car_type: impl Into<String>) -> Self {
        self.car_type = car_type.into();
        self
    }

    pub fn gearbox(mut self, gearbox: impl Into<String>) -> Self {
        self.gearbox = gearbox.into();
        self
    }

    pub fn seats(mut self, seats: i32) -> Self {
        self.seats = seats;
        self
    }

    pub fn mileage(mut self, mileage: i32) -> Self {
        self.mileage = mileage;
        self
    }

    pub fn cancellation(mut self, price: f64) -> Self {
        self.cancellation = price;
        self
    }

    pub fn range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }

    /// Sets the stored, comma separated multimedia flags.
    pub fn multimedia(mut self, multimedia: impl Into<String>) -> Self {
        self.multimedia = multimedia.into();
        self
    }

    pub fn rating(mut self, rating: Option<f64>) -> Self {
        self.rating = rating;
        self
    }

    /// Sets the locations the car is available at.
    pub fn locations(mut self, locations: Vec<i32>) -> Self {
        self.locations = locations;
        self
    }

    /// Builds and inserts the car and its location links.
    ///
    /// # Returns
    /// - `Ok(entity::car::Model)` - Created car entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::car::Model, DbErr> {
        let car = entity::car::ActiveModel {
            id: ActiveValue::NotSet,
            supplier_id: ActiveValue::Set(self.supplier_id),
            name: ActiveValue::Set(self.name),
            minimum_age: ActiveValue::Set(self.minimum_age),
            daily_price: ActiveValue::Set(self.daily_price),
            discounted_daily_price: ActiveValue::Set(None),
            bi_weekly_price: ActiveValue::Set(None),
            discounted_bi_weekly_price: ActiveValue::Set(None),
            weekly_price: ActiveValue::Set(self.weekly_price),
            discounted_weekly_price: ActiveValue::Set(None),
            monthly_price: ActiveValue::Set(self.monthly_price),
            discounted_monthly_price: ActiveValue::Set(None),
            deposit: ActiveValue::Set(self.deposit),
            available: ActiveValue::Set(self.available),
            fully_booked: ActiveValue::Set(false),
            coming_soon: ActiveValue::Set(self.coming_soon),
            car_type: ActiveValue::Set(self.car_type),
            gearbox: ActiveValue::Set(self.gearbox),
            aircon: ActiveValue::Set(true),
            image: ActiveValue::Set(None),
            seats: ActiveValue::Set(self.seats),
            doors: ActiveValue::Set(4),
            fuel_policy: ActiveValue::Set("full_to_full".to_string()),
            mileage: ActiveValue::Set(self.mileage),
            cancellation: ActiveValue::Set(self.cancellation),
            amendments: ActiveValue::Set(0.0),
            theft_protection: ActiveValue::Set(self.theft_protection),
            collision_damage_waiver: ActiveValue::Set(0.0),
            full_insurance: ActiveValue::Set(-1.0),
            additional_driver: ActiveValue::Set(self.additional_driver),
            range: ActiveValue::Set(self.range),
            multimedia: ActiveValue::Set(self.multimedia),
            rating: ActiveValue::Set(self.rating),
            co2: ActiveValue::Set(None),
            trips: ActiveValue::Set(0),
            is_date_based_price: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        for location_id in self.locations {
            entity::car_location::ActiveModel {
                car_id: ActiveValue::Set(car.id),
                location_id: ActiveValue::Set(location_id),
            }
            .insert(self.db)
            .await?;
        }

        Ok(car)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use crate::factory::{country::create_country, location::create_location, user::create_supplier};
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

    #[tokio::test]
    async fn creates_car_with_location_links() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_car_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let supplier = create_supplier(db).await?;
        let country = create_country(db).await?;
        let location = create_location(db, country.id).await?;

        let car = CarFactory::new(db, supplier.id)
            .locations(vec![location.id])
            .build()
            .await?;

        let links = entity::prelude::CarLocation::find()
            .filter(entity::car_location::Column::CarId.eq(car.id))
            .all(db)
            .await?;

        assert_eq!(car.supplier_id, supplier.id);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].location_id, location.id);

        Ok(())
    }
}
