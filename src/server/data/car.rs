//! Car data repository.
//!
//! Cars are returned with their supplier, served locations and date based prices
//! resolved in batch queries. Location links and price ranges are owned by the car
//! and replaced as a whole on update.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::{
    model::enums::{BookingStatus, Mileage},
    server::{
        error::{internal::InternalError, AppError},
        model::{
            car::{AvailabilityWindow, Car, CarFilter, CarParams, DateBasedPrice},
            user::User,
        },
        util::parse::join_multimedia,
    },
};

pub struct CarRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CarRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a car with its location links and date based prices.
    ///
    /// # Returns
    /// - `Ok(Car)` - The created car with relations resolved
    /// - `Err(AppError::DbErr)` - Database error, including an unknown supplier or location
    pub async fn create(&self, params: CarParams) -> Result<Car, AppError> {
        let locations = params.locations.clone();
        let prices = params.date_based_prices.clone();

        let mut active = Self::active_model(params);
        active.trips = ActiveValue::Set(0);
        active.created_at = ActiveValue::Set(Utc::now());
        let car = active.insert(self.db).await?;

        self.replace_locations(car.id, locations).await?;
        self.replace_date_based_prices(car.id, prices).await?;

        self.get_by_id(car.id)
            .await?
            .ok_or(AppError::InternalError(format!(
                "Car with id {} not found after creation",
                car.id
            )))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Car>, AppError> {
        let Some(car) = entity::prelude::Car::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        Ok(self.resolve(vec![car]).await?.into_iter().next())
    }

    /// Gets the bare car row, without relations.
    pub async fn find_entity(&self, id: i32) -> Result<Option<entity::car::Model>, DbErr> {
        entity::prelude::Car::find_by_id(id).one(self.db).await
    }

    /// Replaces every field of a car, its location links and its date based prices.
    ///
    /// The image, trip count and creation date are kept.
    ///
    /// # Returns
    /// - `Ok(Some(Car))` - The updated car
    /// - `Ok(None)` - No car with that id
    pub async fn update(&self, id: i32, params: CarParams) -> Result<Option<Car>, AppError> {
        let Some(existing) = entity::prelude::Car::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let locations = params.locations.clone();
        let prices = params.date_based_prices.clone();

        let mut active = Self::active_model(params);
        active.id = ActiveValue::Unchanged(id);
        active.image = ActiveValue::Unchanged(existing.image);
        active.trips = ActiveValue::Unchanged(existing.trips);
        active.created_at = ActiveValue::Unchanged(existing.created_at);
        active.update(self.db).await?;

        self.replace_locations(id, locations).await?;
        self.replace_date_based_prices(id, prices).await?;

        self.get_by_id(id).await
    }

    pub async fn set_image(&self, id: i32, image: Option<String>) -> Result<(), DbErr> {
        entity::prelude::Car::update_many()
            .filter(entity::car::Column::Id.eq(id))
            .col_expr(entity::car::Column::Image, Expr::value(image))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Deletes a car. Location links, prices and bookings follow through foreign keys.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Car::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_by_supplier(&self, supplier_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Car::find()
            .filter(entity::car::Column::SupplierId.eq(supplier_id))
            .count(self.db)
            .await
    }

    /// Image file names of every car of a supplier.
    pub async fn get_images_by_supplier(&self, supplier_id: i32) -> Result<Vec<String>, DbErr> {
        let images: Vec<Option<String>> = entity::prelude::Car::find()
            .select_only()
            .column(entity::car::Column::Image)
            .filter(entity::car::Column::SupplierId.eq(supplier_id))
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(images.into_iter().flatten().collect())
    }

    /// A car is in use as long as a booking references it.
    pub async fn in_use(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Booking::find()
            .filter(entity::booking::Column::CarId.eq(id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Back-office search, newest first.
    ///
    /// # Returns
    /// - `Ok((cars, total))` - Cars of the requested page and total number of matches
    pub async fn search(
        &self,
        filter: &CarFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Car>, u64), AppError> {
        let query = self
            .apply_filter(entity::prelude::Car::find(), filter)
            .order_by_desc(entity::car::Column::CreatedAt)
            .order_by_desc(entity::car::Column::Id);

        self.fetch_page(query, page, per_page).await
    }

    /// Available cars of a supplier served at a pickup location, for the booking form.
    pub async fn get_booking_cars(
        &self,
        supplier_id: i32,
        pickup_location_id: i32,
        keyword: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Car>, u64), AppError> {
        let car_ids = self.car_ids_at_location(pickup_location_id).await?;

        let mut query = entity::prelude::Car::find()
            .filter(entity::car::Column::SupplierId.eq(supplier_id))
            .filter(entity::car::Column::Id.is_in(car_ids))
            .filter(entity::car::Column::Available.eq(true));

        if let Some(keyword) = keyword {
            query = query.filter(entity::car::Column::Name.contains(keyword));
        }

        let query = query.order_by_asc(entity::car::Column::Name);

        self.fetch_page(query, page, per_page).await
    }

    /// Storefront search: available cars served at the pickup location, free for the
    /// whole window, whose supplier accepts rentals of that length. Cheapest first.
    pub async fn get_frontend_cars(
        &self,
        filter: &CarFilter,
        window: &AvailabilityWindow,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Car>, u64), AppError> {
        let query = self
            .frontend_query(filter, window)
            .await?
            .order_by_asc(entity::car::Column::DailyPrice)
            .order_by_asc(entity::car::Column::Id);

        self.fetch_page(query, page, per_page).await
    }

    /// Suppliers owning at least one car the storefront search would return for a
    /// location, with the number of such cars, ordered by supplier id.
    pub async fn get_frontend_supplier_counts(
        &self,
        filter: &CarFilter,
        pickup_location_id: i32,
    ) -> Result<Vec<(i32, u64)>, DbErr> {
        let car_ids = self.car_ids_at_location(pickup_location_id).await?;

        let supplier_ids: Vec<i32> = self
            .apply_filter(entity::prelude::Car::find(), filter)
            .filter(entity::car::Column::Id.is_in(car_ids))
            .filter(entity::car::Column::Available.eq(true))
            .select_only()
            .column(entity::car::Column::SupplierId)
            .into_tuple()
            .all(self.db)
            .await?;

        let mut counts: Vec<(i32, u64)> = Vec::new();
        for supplier_id in supplier_ids {
            match counts.iter_mut().find(|(id, _)| *id == supplier_id) {
                Some((_, count)) => *count += 1,
                None => counts.push((supplier_id, 1)),
            }
        }
        counts.sort_by_key(|(id, _)| *id);

        Ok(counts)
    }

    async fn frontend_query(
        &self,
        filter: &CarFilter,
        window: &AvailabilityWindow,
    ) -> Result<Select<entity::car::Entity>, DbErr> {
        let car_ids = self.car_ids_at_location(window.pickup_location_id).await?;

        let active: Vec<&str> = BookingStatus::ACTIVE.iter().map(|s| s.as_str()).collect();
        let booked_car_ids: Vec<i32> = entity::prelude::Booking::find()
            .select_only()
            .column(entity::booking::Column::CarId)
            .filter(entity::booking::Column::Status.is_in(active))
            .filter(entity::booking::Column::FromDate.lt(window.to))
            .filter(entity::booking::Column::ToDate.gt(window.from))
            .distinct()
            .into_tuple()
            .all(self.db)
            .await?;

        let strict_supplier_ids: Vec<i32> = entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::Id)
            .filter(entity::user::Column::MinimumRentalDays.gt(window.days))
            .into_tuple()
            .all(self.db)
            .await?;

        let mut query = self
            .apply_filter(entity::prelude::Car::find(), filter)
            .filter(entity::car::Column::Id.is_in(car_ids))
            .filter(entity::car::Column::Available.eq(true));

        if !booked_car_ids.is_empty() {
            query = query.filter(entity::car::Column::Id.is_not_in(booked_car_ids));
        }
        if !strict_supplier_ids.is_empty() {
            query = query.filter(entity::car::Column::SupplierId.is_not_in(strict_supplier_ids));
        }

        Ok(query)
    }

    fn apply_filter(
        &self,
        mut query: Select<entity::car::Entity>,
        filter: &CarFilter,
    ) -> Select<entity::car::Entity> {
        if !filter.suppliers.is_empty() {
            query = query.filter(entity::car::Column::SupplierId.is_in(filter.suppliers.clone()));
        }
        if let Some(keyword) = filter.keyword.as_deref() {
            query = query.filter(entity::car::Column::Name.contains(keyword));
        }
        if !filter.car_types.is_empty() {
            let values: Vec<&str> = filter.car_types.iter().map(|v| v.as_str()).collect();
            query = query.filter(entity::car::Column::CarType.is_in(values));
        }
        if !filter.gearboxes.is_empty() {
            let values: Vec<&str> = filter.gearboxes.iter().map(|v| v.as_str()).collect();
            query = query.filter(entity::car::Column::Gearbox.is_in(values));
        }
        match filter.mileage {
            Some(Mileage::Limited) => query = query.filter(entity::car::Column::Mileage.gt(-1)),
            Some(Mileage::Unlimited) => query = query.filter(entity::car::Column::Mileage.eq(-1)),
            None => {}
        }
        if !filter.fuel_policies.is_empty() {
            let values: Vec<&str> = filter.fuel_policies.iter().map(|v| v.as_str()).collect();
            query = query.filter(entity::car::Column::FuelPolicy.is_in(values));
        }
        if let Some(deposit) = filter.deposit_max {
            query = query.filter(entity::car::Column::Deposit.lte(deposit));
        }
        if let Some(available) = filter.available {
            query = query.filter(entity::car::Column::Available.eq(available));
        }
        if !filter.ranges.is_empty() {
            let values: Vec<&str> = filter.ranges.iter().map(|v| v.as_str()).collect();
            query = query.filter(entity::car::Column::Range.is_in(values));
        }
        for multimedia in &filter.multimedia {
            query = query.filter(entity::car::Column::Multimedia.contains(multimedia.as_str()));
        }
        if let Some(rating) = filter.rating_min {
            query = query.filter(entity::car::Column::Rating.gte(rating));
        }
        if let Some(seats) = filter.seats_min {
            query = query.filter(entity::car::Column::Seats.gte(seats));
        }
        query
    }

    async fn car_ids_at_location(&self, location_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::CarLocation::find()
            .select_only()
            .column(entity::car_location::Column::CarId)
            .filter(entity::car_location::Column::LocationId.eq(location_id))
            .into_tuple()
            .all(self.db)
            .await
    }

    async fn fetch_page(
        &self,
        query: Select<entity::car::Entity>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Car>, u64), AppError> {
        let paginator = query.paginate(self.db, per_page.max(1));

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((self.resolve(entities).await?, total))
    }

    async fn replace_locations(&self, car_id: i32, locations: Vec<i32>) -> Result<(), DbErr> {
        entity::prelude::CarLocation::delete_many()
            .filter(entity::car_location::Column::CarId.eq(car_id))
            .exec(self.db)
            .await?;

        let mut unique = locations;
        unique.sort_unstable();
        unique.dedup();
        if unique.is_empty() {
            return Ok(());
        }

        let models = unique
            .into_iter()
            .map(|location_id| entity::car_location::ActiveModel {
                car_id: ActiveValue::Set(car_id),
                location_id: ActiveValue::Set(location_id),
            });

        entity::prelude::CarLocation::insert_many(models)
            .exec_without_returning(self.db)
            .await?;

        Ok(())
    }

    async fn replace_date_based_prices(
        &self,
        car_id: i32,
        prices: Vec<DateBasedPrice>,
    ) -> Result<(), DbErr> {
        entity::prelude::DateBasedPrice::delete_many()
            .filter(entity::date_based_price::Column::CarId.eq(car_id))
            .exec(self.db)
            .await?;

        if prices.is_empty() {
            return Ok(());
        }

        let models = prices
            .into_iter()
            .map(|price| entity::date_based_price::ActiveModel {
                car_id: ActiveValue::Set(car_id),
                start_date: ActiveValue::Set(price.start_date),
                end_date: ActiveValue::Set(price.end_date),
                daily_price: ActiveValue::Set(price.daily_price),
                ..Default::default()
            });

        entity::prelude::DateBasedPrice::insert_many(models)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Attaches suppliers, locations and date based prices to car rows, keeping their order.
    async fn resolve(&self, cars: Vec<entity::car::Model>) -> Result<Vec<Car>, AppError> {
        if cars.is_empty() {
            return Ok(Vec::new());
        }

        let car_ids: Vec<i32> = cars.iter().map(|c| c.id).collect();
        let supplier_ids: Vec<i32> = cars.iter().map(|c| c.supplier_id).collect();

        let mut suppliers: HashMap<i32, User> = HashMap::new();
        for supplier in entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(supplier_ids))
            .all(self.db)
            .await?
        {
            suppliers.insert(supplier.id, User::from_entity(supplier)?);
        }

        let links = entity::prelude::CarLocation::find()
            .filter(entity::car_location::Column::CarId.is_in(car_ids.clone()))
            .all(self.db)
            .await?;
        let location_ids: Vec<i32> = links.iter().map(|l| l.location_id).collect();
        let locations: HashMap<i32, entity::location::Model> = entity::prelude::Location::find()
            .filter(entity::location::Column::Id.is_in(location_ids))
            .order_by_asc(entity::location::Column::Name)
            .all(self.db)
            .await?
            .into_iter()
            .map(|l| (l.id, l))
            .collect();
        let mut locations_by_car: HashMap<i32, Vec<entity::location::Model>> = HashMap::new();
        for link in links {
            if let Some(location) = locations.get(&link.location_id) {
                locations_by_car
                    .entry(link.car_id)
                    .or_default()
                    .push(location.clone());
            }
        }

        let mut prices_by_car: HashMap<i32, Vec<entity::date_based_price::Model>> = HashMap::new();
        for price in entity::prelude::DateBasedPrice::find()
            .filter(entity::date_based_price::Column::CarId.is_in(car_ids))
            .order_by_asc(entity::date_based_price::Column::StartDate)
            .all(self.db)
            .await?
        {
            prices_by_car.entry(price.car_id).or_default().push(price);
        }

        let mut results = Vec::with_capacity(cars.len());
        for car in cars {
            let supplier = suppliers.get(&car.supplier_id).cloned().ok_or(
                InternalError::MissingRelation {
                    entity: "supplier",
                    id: car.supplier_id,
                },
            )?;
            let mut car_locations = locations_by_car.remove(&car.id).unwrap_or_default();
            car_locations.sort_by(|a, b| a.name.cmp(&b.name));
            let prices = prices_by_car.remove(&car.id).unwrap_or_default();
            results.push(Car::from_entity(car, supplier, car_locations, prices)?);
        }

        Ok(results)
    }

    fn active_model(params: CarParams) -> entity::car::ActiveModel {
        entity::car::ActiveModel {
            supplier_id: ActiveValue::Set(params.supplier_id),
            name: ActiveValue::Set(params.name),
            minimum_age: ActiveValue::Set(params.minimum_age),
            daily_price: ActiveValue::Set(params.daily_price),
            discounted_daily_price: ActiveValue::Set(params.discounted_daily_price),
            bi_weekly_price: ActiveValue::Set(params.bi_weekly_price),
            discounted_bi_weekly_price: ActiveValue::Set(params.discounted_bi_weekly_price),
            weekly_price: ActiveValue::Set(params.weekly_price),
            discounted_weekly_price: ActiveValue::Set(params.discounted_weekly_price),
            monthly_price: ActiveValue::Set(params.monthly_price),
            discounted_monthly_price: ActiveValue::Set(params.discounted_monthly_price),
            deposit: ActiveValue::Set(params.deposit),
            available: ActiveValue::Set(params.available),
            fully_booked: ActiveValue::Set(params.fully_booked),
            coming_soon: ActiveValue::Set(params.coming_soon),
            car_type: ActiveValue::Set(params.car_type.as_str().to_string()),
            gearbox: ActiveValue::Set(params.gearbox.as_str().to_string()),
            aircon: ActiveValue::Set(params.aircon),
            image: ActiveValue::Set(params.image),
            seats: ActiveValue::Set(params.seats),
            doors: ActiveValue::Set(params.doors),
            fuel_policy: ActiveValue::Set(params.fuel_policy.as_str().to_string()),
            mileage: ActiveValue::Set(params.mileage),
            cancellation: ActiveValue::Set(params.cancellation),
            amendments: ActiveValue::Set(params.amendments),
            theft_protection: ActiveValue::Set(params.theft_protection),
            collision_damage_waiver: ActiveValue::Set(params.collision_damage_waiver),
            full_insurance: ActiveValue::Set(params.full_insurance),
            additional_driver: ActiveValue::Set(params.additional_driver),
            range: ActiveValue::Set(params.range.as_str().to_string()),
            multimedia: ActiveValue::Set(join_multimedia(&params.multimedia)),
            rating: ActiveValue::Set(params.rating),
            co2: ActiveValue::Set(params.co2),
            is_date_based_price: ActiveValue::Set(params.is_date_based_price),
            ..Default::default()
        }
    }
}
