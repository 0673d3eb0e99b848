//! Car service for business logic.
//!
//! Validation of car payloads, the supplier car limit, image handling and the three
//! car searches: back-office, booking form and storefront.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    data::{booking::BookingRepository, car::CarRepository, location::LocationRepository, user::UserRepository},
    error::AppError,
    model::{
        car::{AvailabilityWindow, Car, CarFilter, CarParams, PaginatedCars},
        page_count,
    },
    service::{
        mail::Mailer,
        notification::NotificationService,
        pricing,
        push::PushService,
        storage::{FileStorage, Folder},
    },
    util::validate::validate_name,
};

/// Oldest minimum driver age a car may require.
pub const MAXIMUM_DRIVER_AGE: i32 = 99;

pub struct CarService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
    mailer: &'a Mailer,
    push: &'a PushService,
    storage: &'a FileStorage,
}

impl<'a> CarService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        config: &'a Config,
        mailer: &'a Mailer,
        push: &'a PushService,
        storage: &'a FileStorage,
    ) -> Self {
        Self {
            db,
            config,
            mailer,
            push,
            storage,
        }
    }

    /// Creates a car for a supplier.
    ///
    /// A temporary image named in `params` is moved into place. Admins are notified
    /// when the supplier asked for it.
    ///
    /// # Returns
    /// - `Ok(Car)` - The new car
    /// - `Err(AppError::BadRequest)` - Invalid payload or unknown supplier
    /// - `Err(AppError::Conflict)` - The supplier reached its car limit
    /// - `Err(AppError::NotFound)` - The temporary image does not exist; nothing is saved
    pub async fn create(&self, mut params: CarParams) -> Result<Car, AppError> {
        self.validate(&mut params).await?;

        let Some(supplier) = UserRepository::new(self.db)
            .find_by_id(params.supplier_id)
            .await?
            .filter(|u| u.is_supplier())
        else {
            return Err(AppError::BadRequest(format!(
                "Supplier {} does not exist",
                params.supplier_id
            )));
        };

        let repo = CarRepository::new(self.db);
        if let Some(limit) = supplier.supplier_car_limit {
            let count = repo.count_by_supplier(supplier.id).await?;
            if count >= limit.max(0) as u64 {
                return Err(AppError::Conflict(format!(
                    "Supplier {} reached its limit of {} cars",
                    supplier.full_name, limit
                )));
            }
        }

        let temp_image = params.image.take();
        if let Some(temp) = &temp_image {
            self.storage.check_temp(Folder::Cars, temp).await?;
        }

        let mut car = repo.create(params).await?;

        if let Some(temp) = temp_image {
            let name = self.storage.promote(Folder::Cars, &temp, car.id).await?;
            repo.set_image(car.id, Some(name.clone())).await?;
            car.image = Some(name);
        }

        if supplier.notify_admin_on_new_car {
            let message = format!("Supplier {} added the car {}.", supplier.full_name, car.name);
            if let Err(e) = NotificationService::new(self.db, self.mailer, self.push)
                .notify_admins("New car", &message, None)
                .await
            {
                tracing::warn!("Failed to notify admins of car {}: {}", car.id, e);
            }
        }

        tracing::info!("Supplier {} created car {}", supplier.id, car.id);

        Ok(car)
    }

    /// Replaces the fields of a car; `None` when it does not exist. The image is
    /// managed separately.
    pub async fn update(&self, id: i32, mut params: CarParams) -> Result<Option<Car>, AppError> {
        self.validate(&mut params).await?;
        params.image = None;

        CarRepository::new(self.db).update(id, params).await
    }

    async fn validate(&self, params: &mut CarParams) -> Result<(), AppError> {
        params.name = validate_name("Car name", &params.name)?;

        if params.minimum_age < self.config.minimum_age || params.minimum_age > MAXIMUM_DRIVER_AGE {
            return Err(AppError::BadRequest(format!(
                "Minimum age must be between {} and {}",
                self.config.minimum_age, MAXIMUM_DRIVER_AGE
            )));
        }

        if params.daily_price < 0.0 || params.deposit < 0.0 {
            return Err(AppError::BadRequest(
                "Prices and deposit must not be negative".to_string(),
            ));
        }

        if params.seats < 1 || params.doors < 1 {
            return Err(AppError::BadRequest(
                "Seats and doors must be positive".to_string(),
            ));
        }

        if params.is_date_based_price {
            if let Some(range) = params
                .date_based_prices
                .iter()
                .find(|p| p.start_date > p.end_date || p.daily_price < 0.0)
            {
                return Err(AppError::BadRequest(format!(
                    "Invalid date based price from {} to {}",
                    range.start_date, range.end_date
                )));
            }
        } else {
            params.date_based_prices.clear();
        }

        params.locations.sort_unstable();
        params.locations.dedup();
        if params.locations.is_empty() {
            return Err(AppError::BadRequest(
                "A car needs at least one location".to_string(),
            ));
        }

        let location_repo = LocationRepository::new(self.db);
        for location_id in &params.locations {
            if location_repo.get_by_id(*location_id).await?.is_none() {
                return Err(AppError::BadRequest(format!(
                    "Location {} does not exist",
                    location_id
                )));
            }
        }

        Ok(())
    }

    /// Deletes a car with its bookings, their additional drivers and the car image.
    ///
    /// # Returns
    /// - `Ok(false)` - No car with that id
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let repo = CarRepository::new(self.db);
        let Some(car) = repo.find_entity(id).await? else {
            return Ok(false);
        };

        let booking_repo = BookingRepository::new(self.db);
        let additional_drivers = booking_repo.additional_driver_ids_of_car(id).await?;

        repo.delete(id).await?;
        booking_repo
            .delete_additional_drivers(additional_drivers)
            .await?;

        if let Some(image) = &car.image {
            if let Err(e) = self.storage.delete(Folder::Cars, image).await {
                tracing::warn!("Failed to delete image of car {}: {}", id, e);
            }
        }

        tracing::info!("Deleted car {}", id);

        Ok(true)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Car>, AppError> {
        CarRepository::new(self.db).get_by_id(id).await
    }

    /// Back-office search, newest first.
    pub async fn search(
        &self,
        filter: &CarFilter,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedCars, AppError> {
        let (cars, total) = CarRepository::new(self.db)
            .search(filter, page, per_page)
            .await?;

        Ok(paginated(cars, total, page, per_page))
    }

    /// Available cars of a supplier at a pickup location, for the booking form.
    pub async fn get_booking_cars(
        &self,
        supplier_id: i32,
        pickup_location_id: i32,
        keyword: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedCars, AppError> {
        let keyword = keyword.map(str::trim).filter(|k| !k.is_empty());
        let (cars, total) = CarRepository::new(self.db)
            .get_booking_cars(supplier_id, pickup_location_id, keyword, page, per_page)
            .await?;

        Ok(paginated(cars, total, page, per_page))
    }

    /// Storefront search for a rental window.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - `from` is not before `to`
    pub async fn get_frontend_cars(
        &self,
        filter: &CarFilter,
        pickup_location_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedCars, AppError> {
        if from >= to {
            return Err(AppError::BadRequest(
                "Pickup must be before drop-off".to_string(),
            ));
        }

        let window = AvailabilityWindow {
            pickup_location_id,
            from,
            to,
            days: pricing::days(from, to),
        };

        let (cars, total) = CarRepository::new(self.db)
            .get_frontend_cars(filter, &window, page, per_page)
            .await?;

        Ok(paginated(cars, total, page, per_page))
    }

    /// Whether bookings refer to the car.
    pub async fn in_use(&self, id: i32) -> Result<bool, AppError> {
        Ok(CarRepository::new(self.db).in_use(id).await?)
    }

    pub async fn upload_temp_image(&self, original_name: &str, bytes: &[u8]) -> Result<String, AppError> {
        self.storage
            .save_temp(Folder::Cars, original_name, bytes)
            .await
    }

    pub async fn delete_temp_image(&self, name: &str) -> Result<(), AppError> {
        self.storage.delete_temp(Folder::Cars, name).await
    }

    /// Replaces the image of a car; `None` when it does not exist.
    pub async fn update_image(
        &self,
        id: i32,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<Option<String>, AppError> {
        let repo = CarRepository::new(self.db);
        let Some(car) = repo.find_entity(id).await? else {
            return Ok(None);
        };

        let name = self
            .storage
            .replace(Folder::Cars, id, original_name, bytes, car.image.as_deref())
            .await?;
        repo.set_image(id, Some(name.clone())).await?;

        Ok(Some(name))
    }

    pub async fn delete_image(&self, id: i32) -> Result<bool, AppError> {
        let repo = CarRepository::new(self.db);
        let Some(car) = repo.find_entity(id).await? else {
            return Ok(false);
        };

        if let Some(image) = &car.image {
            self.storage.delete(Folder::Cars, image).await?;
        }
        repo.set_image(id, None).await?;

        Ok(true)
    }
}

fn paginated(cars: Vec<Car>, total: u64, page: u64, per_page: u64) -> PaginatedCars {
    PaginatedCars {
        cars,
        total,
        page,
        per_page,
        total_pages: page_count(total, per_page),
    }
}
