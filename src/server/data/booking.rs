//! Booking data repository.
//!
//! Owns the booking table and the additional drivers attached to bookings. Deleting a
//! booking does not remove its additional driver through the foreign key, so every
//! deletion path here collects and deletes them explicitly.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::enums::BookingStatus,
    server::{
        error::{internal::InternalError, AppError},
        model::booking::{
            AdditionalDriver, AdditionalDriverParams, Booking, BookingDetail, BookingListItem,
            BookingSearchParams, ConfirmPaymentParams, CreateBookingParams, UpdateBookingParams,
        },
    },
};

pub struct BookingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BookingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a booking row.
    ///
    /// # Returns
    /// - `Ok(Booking)` - The created booking
    /// - `Err(AppError::DbErr)` - Database error, including unknown car, user or location
    pub async fn create(&self, params: CreateBookingParams) -> Result<Booking, AppError> {
        let booking = entity::booking::ActiveModel {
            supplier_id: ActiveValue::Set(params.supplier_id),
            car_id: ActiveValue::Set(params.car_id),
            driver_id: ActiveValue::Set(params.driver_id),
            pickup_location_id: ActiveValue::Set(params.pickup_location_id),
            drop_off_location_id: ActiveValue::Set(params.drop_off_location_id),
            from_date: ActiveValue::Set(params.from),
            to_date: ActiveValue::Set(params.to),
            status: ActiveValue::Set(params.status.as_str().to_string()),
            cancellation: ActiveValue::Set(params.options.cancellation),
            amendments: ActiveValue::Set(params.options.amendments),
            theft_protection: ActiveValue::Set(params.options.theft_protection),
            collision_damage_waiver: ActiveValue::Set(params.options.collision_damage_waiver),
            full_insurance: ActiveValue::Set(params.options.full_insurance),
            additional_driver: ActiveValue::Set(params.options.additional_driver),
            additional_driver_id: ActiveValue::Set(params.additional_driver_id),
            cancel_request: ActiveValue::Set(false),
            price: ActiveValue::Set(params.price),
            session_id: ActiveValue::Set(params.session_id),
            payment_intent_id: ActiveValue::Set(None),
            customer_id: ActiveValue::Set(None),
            expire_at: ActiveValue::Set(params.expire_at),
            is_deposit: ActiveValue::Set(params.is_deposit),
            is_payed_in_full: ActiveValue::Set(params.is_payed_in_full),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Booking::from_entity(booking)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Booking>, AppError> {
        entity::prelude::Booking::find_by_id(id)
            .one(self.db)
            .await?
            .map(Booking::from_entity)
            .transpose()
    }

    pub async fn get_by_ids(&self, ids: Vec<i32>) -> Result<Vec<Booking>, AppError> {
        entity::prelude::Booking::find()
            .filter(entity::booking::Column::Id.is_in(ids))
            .order_by_asc(entity::booking::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Booking::from_entity)
            .collect()
    }

    /// Gets a booking with its additional driver and the names of everything it references.
    pub async fn get_detail(&self, id: i32) -> Result<Option<BookingDetail>, AppError> {
        let Some(booking) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let car = entity::prelude::Car::find_by_id(booking.car_id)
            .one(self.db)
            .await?
            .ok_or(InternalError::MissingRelation {
                entity: "car",
                id: booking.car_id,
            })?;
        let supplier = self.find_user(booking.supplier_id).await?;
        let driver = self.find_user(booking.driver_id).await?;
        let pickup = self.find_location(booking.pickup_location_id).await?;
        let drop_off = self.find_location(booking.drop_off_location_id).await?;

        let additional_driver = match booking.additional_driver_id {
            Some(driver_id) => self.get_additional_driver(driver_id).await?,
            None => None,
        };

        Ok(Some(BookingDetail {
            booking,
            additional_driver,
            car_name: car.name,
            car_image: car.image,
            supplier_name: supplier.full_name,
            driver_name: driver.full_name,
            driver_email: driver.email,
            pickup_location_name: pickup.name,
            drop_off_location_name: drop_off.name,
        }))
    }

    /// Replaces the editable fields of a booking. Payment fields are left untouched.
    ///
    /// # Returns
    /// - `Ok(Some(Booking))` - The updated booking
    /// - `Ok(None)` - No booking with that id
    pub async fn update(&self, params: UpdateBookingParams) -> Result<Option<Booking>, AppError> {
        let Some(existing) = entity::prelude::Booking::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::booking::ActiveModel = existing.into();
        active.supplier_id = ActiveValue::Set(params.supplier_id);
        active.car_id = ActiveValue::Set(params.car_id);
        active.driver_id = ActiveValue::Set(params.driver_id);
        active.pickup_location_id = ActiveValue::Set(params.pickup_location_id);
        active.drop_off_location_id = ActiveValue::Set(params.drop_off_location_id);
        active.from_date = ActiveValue::Set(params.from);
        active.to_date = ActiveValue::Set(params.to);
        active.status = ActiveValue::Set(params.status.as_str().to_string());
        active.cancellation = ActiveValue::Set(params.options.cancellation);
        active.amendments = ActiveValue::Set(params.options.amendments);
        active.theft_protection = ActiveValue::Set(params.options.theft_protection);
        active.collision_damage_waiver = ActiveValue::Set(params.options.collision_damage_waiver);
        active.full_insurance = ActiveValue::Set(params.options.full_insurance);
        active.additional_driver = ActiveValue::Set(params.options.additional_driver);
        active.additional_driver_id = ActiveValue::Set(params.additional_driver_id);
        active.price = ActiveValue::Set(params.price);

        Ok(Some(Booking::from_entity(active.update(self.db).await?)?))
    }

    /// Sets the status of several bookings at once.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of bookings updated
    pub async fn update_status(&self, ids: Vec<i32>, status: BookingStatus) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Booking::update_many()
            .filter(entity::booking::Column::Id.is_in(ids))
            .col_expr(
                entity::booking::Column::Status,
                Expr::value(status.as_str().to_string()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Flags a booking as having a cancellation request from its driver.
    pub async fn set_cancel_request(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Booking::update_many()
            .filter(entity::booking::Column::Id.eq(id))
            .col_expr(entity::booking::Column::CancelRequest, Expr::value(true))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn find_by_session_id(&self, session_id: &str) -> Result<Option<Booking>, AppError> {
        entity::prelude::Booking::find()
            .filter(entity::booking::Column::SessionId.eq(session_id))
            .one(self.db)
            .await?
            .map(Booking::from_entity)
            .transpose()
    }

    /// Records a confirmed payment and clears the expiry of a `void` booking.
    pub async fn confirm_payment(
        &self,
        id: i32,
        params: ConfirmPaymentParams,
    ) -> Result<Option<Booking>, AppError> {
        let Some(existing) = entity::prelude::Booking::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::booking::ActiveModel = existing.into();
        active.status = ActiveValue::Set(params.status.as_str().to_string());
        active.payment_intent_id = ActiveValue::Set(params.payment_intent_id);
        active.customer_id = ActiveValue::Set(params.customer_id);
        active.is_deposit = ActiveValue::Set(params.is_deposit);
        active.is_payed_in_full = ActiveValue::Set(params.is_payed_in_full);
        active.expire_at = ActiveValue::Set(None);

        Ok(Some(Booking::from_entity(active.update(self.db).await?)?))
    }

    /// Whether the car has a booking in an active status overlapping `[from, to)`.
    pub async fn car_is_booked(
        &self,
        car_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        exclude_booking_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let active: Vec<&str> = BookingStatus::ACTIVE.iter().map(|s| s.as_str()).collect();

        let mut query = entity::prelude::Booking::find()
            .filter(entity::booking::Column::CarId.eq(car_id))
            .filter(entity::booking::Column::Status.is_in(active))
            .filter(entity::booking::Column::FromDate.lt(to))
            .filter(entity::booking::Column::ToDate.gt(from));

        if let Some(id) = exclude_booking_id {
            query = query.filter(entity::booking::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Whether a user has bookings as driver or as supplier.
    pub async fn user_has_bookings(&self, user_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Booking::find()
            .filter(
                Condition::any()
                    .add(entity::booking::Column::DriverId.eq(user_id))
                    .add(entity::booking::Column::SupplierId.eq(user_id)),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Deletes bookings and their additional drivers.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of bookings deleted
    pub async fn delete_many(&self, ids: Vec<i32>) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let driver_ids = self
            .additional_driver_ids(entity::booking::Column::Id.is_in(ids.clone()))
            .await?;

        let result = entity::prelude::Booking::delete_many()
            .filter(entity::booking::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;

        self.delete_additional_drivers(driver_ids).await?;

        Ok(result.rows_affected)
    }

    /// Deletes `void` bookings whose checkout window has passed.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of bookings deleted
    pub async fn delete_expired_void(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let ids: Vec<i32> = entity::prelude::Booking::find()
            .select_only()
            .column(entity::booking::Column::Id)
            .filter(entity::booking::Column::Status.eq(BookingStatus::Void.as_str()))
            .filter(entity::booking::Column::ExpireAt.lte(now))
            .into_tuple()
            .all(self.db)
            .await?;

        self.delete_many(ids).await
    }

    /// Additional drivers of every booking where one of the users is driver or supplier.
    ///
    /// Collect these before deleting users, since the booking rows go with them.
    pub async fn additional_driver_ids_of_users(&self, user_ids: Vec<i32>) -> Result<Vec<i32>, DbErr> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.additional_driver_ids(
            Condition::any()
                .add(entity::booking::Column::DriverId.is_in(user_ids.clone()))
                .add(entity::booking::Column::SupplierId.is_in(user_ids)),
        )
        .await
    }

    pub async fn additional_driver_ids_of_car(&self, car_id: i32) -> Result<Vec<i32>, DbErr> {
        self.additional_driver_ids(entity::booking::Column::CarId.eq(car_id))
            .await
    }

    async fn additional_driver_ids<F>(&self, filter: F) -> Result<Vec<i32>, DbErr>
    where
        F: sea_orm::sea_query::IntoCondition,
    {
        let ids: Vec<Option<i32>> = entity::prelude::Booking::find()
            .select_only()
            .column(entity::booking::Column::AdditionalDriverId)
            .filter(filter)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(ids.into_iter().flatten().collect())
    }

    pub async fn create_additional_driver(
        &self,
        params: AdditionalDriverParams,
    ) -> Result<AdditionalDriver, DbErr> {
        let driver = entity::additional_driver::ActiveModel {
            full_name: ActiveValue::Set(params.full_name),
            email: ActiveValue::Set(params.email),
            phone: ActiveValue::Set(params.phone),
            birth_date: ActiveValue::Set(params.birth_date),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(AdditionalDriver::from_entity(driver))
    }

    pub async fn get_additional_driver(&self, id: i32) -> Result<Option<AdditionalDriver>, DbErr> {
        Ok(entity::prelude::AdditionalDriver::find_by_id(id)
            .one(self.db)
            .await?
            .map(AdditionalDriver::from_entity))
    }

    pub async fn update_additional_driver(
        &self,
        id: i32,
        params: AdditionalDriverParams,
    ) -> Result<Option<AdditionalDriver>, DbErr> {
        let Some(existing) = entity::prelude::AdditionalDriver::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::additional_driver::ActiveModel = existing.into();
        active.full_name = ActiveValue::Set(params.full_name);
        active.email = ActiveValue::Set(params.email);
        active.phone = ActiveValue::Set(params.phone);
        active.birth_date = ActiveValue::Set(params.birth_date);

        Ok(Some(AdditionalDriver::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete_additional_drivers(&self, ids: Vec<i32>) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::AdditionalDriver::delete_many()
            .filter(entity::additional_driver::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Back-office booking search, newest first.
    ///
    /// The keyword matches a booking id exactly, or a car, driver or supplier name
    /// partially.
    ///
    /// # Returns
    /// - `Ok((items, total))` - List rows of the requested page and total number of matches
    pub async fn search(
        &self,
        params: &BookingSearchParams,
    ) -> Result<(Vec<BookingListItem>, u64), AppError> {
        let mut query = entity::prelude::Booking::find();

        if !params.suppliers.is_empty() {
            query = query.filter(entity::booking::Column::SupplierId.is_in(params.suppliers.clone()));
        }
        if !params.statuses.is_empty() {
            let statuses: Vec<&str> = params.statuses.iter().map(|s| s.as_str()).collect();
            query = query.filter(entity::booking::Column::Status.is_in(statuses));
        }
        if let Some(driver_id) = params.driver_id {
            query = query.filter(entity::booking::Column::DriverId.eq(driver_id));
        }
        if let Some(car_id) = params.car_id {
            query = query.filter(entity::booking::Column::CarId.eq(car_id));
        }
        if let Some(from) = params.from {
            query = query.filter(entity::booking::Column::FromDate.gte(from));
        }
        if let Some(to) = params.to {
            query = query.filter(entity::booking::Column::ToDate.lte(to));
        }
        if let Some(location_id) = params.pickup_location_id {
            query = query.filter(entity::booking::Column::PickupLocationId.eq(location_id));
        }
        if let Some(location_id) = params.drop_off_location_id {
            query = query.filter(entity::booking::Column::DropOffLocationId.eq(location_id));
        }
        if let Some(keyword) = params.keyword.as_deref() {
            query = query.filter(self.keyword_condition(keyword).await?);
        }

        let paginator = query
            .order_by_desc(entity::booking::Column::CreatedAt)
            .order_by_desc(entity::booking::Column::Id)
            .paginate(self.db, params.per_page.max(1));

        let total = paginator.num_items().await?;
        let bookings = paginator.fetch_page(params.page).await?;

        Ok((self.list_items(bookings).await?, total))
    }

    async fn keyword_condition(&self, keyword: &str) -> Result<Condition, DbErr> {
        let car_ids: Vec<i32> = entity::prelude::Car::find()
            .select_only()
            .column(entity::car::Column::Id)
            .filter(entity::car::Column::Name.contains(keyword))
            .into_tuple()
            .all(self.db)
            .await?;

        let user_ids: Vec<i32> = entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::Id)
            .filter(entity::user::Column::FullName.contains(keyword))
            .into_tuple()
            .all(self.db)
            .await?;

        let mut condition = Condition::any()
            .add(entity::booking::Column::CarId.is_in(car_ids))
            .add(entity::booking::Column::DriverId.is_in(user_ids.clone()))
            .add(entity::booking::Column::SupplierId.is_in(user_ids));

        if let Ok(id) = keyword.parse::<i32>() {
            condition = condition.add(entity::booking::Column::Id.eq(id));
        }

        Ok(condition)
    }

    async fn list_items(
        &self,
        bookings: Vec<entity::booking::Model>,
    ) -> Result<Vec<BookingListItem>, AppError> {
        if bookings.is_empty() {
            return Ok(Vec::new());
        }

        let car_ids: Vec<i32> = bookings.iter().map(|b| b.car_id).collect();
        let user_ids: Vec<i32> = bookings
            .iter()
            .flat_map(|b| [b.driver_id, b.supplier_id])
            .collect();
        let location_ids: Vec<i32> = bookings
            .iter()
            .flat_map(|b| [b.pickup_location_id, b.drop_off_location_id])
            .collect();

        let cars: HashMap<i32, String> = entity::prelude::Car::find()
            .filter(entity::car::Column::Id.is_in(car_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();
        let users: HashMap<i32, String> = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(user_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u.full_name))
            .collect();
        let locations: HashMap<i32, String> = entity::prelude::Location::find()
            .filter(entity::location::Column::Id.is_in(location_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|l| (l.id, l.name))
            .collect();

        let name_of = |names: &HashMap<i32, String>, entity: &'static str, id: i32| {
            names
                .get(&id)
                .cloned()
                .ok_or(InternalError::MissingRelation { entity, id })
        };

        let mut items = Vec::with_capacity(bookings.len());
        for entity in bookings {
            let booking = Booking::from_entity(entity)?;
            items.push(BookingListItem {
                id: booking.id,
                status: booking.status,
                from: booking.from,
                to: booking.to,
                price: booking.price,
                cancel_request: booking.cancel_request,
                car_id: booking.car_id,
                car_name: name_of(&cars, "car", booking.car_id)?,
                supplier_id: booking.supplier_id,
                supplier_name: name_of(&users, "supplier", booking.supplier_id)?,
                driver_id: booking.driver_id,
                driver_name: name_of(&users, "driver", booking.driver_id)?,
                pickup_location_name: name_of(&locations, "location", booking.pickup_location_id)?,
                drop_off_location_name: name_of(
                    &locations,
                    "location",
                    booking.drop_off_location_id,
                )?,
                created_at: booking.created_at,
            });
        }

        Ok(items)
    }

    async fn find_user(&self, id: i32) -> Result<entity::user::Model, AppError> {
        Ok(entity::prelude::User::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(InternalError::MissingRelation { entity: "user", id })?)
    }

    async fn find_location(&self, id: i32) -> Result<entity::location::Model, AppError> {
        Ok(entity::prelude::Location::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(InternalError::MissingRelation {
                entity: "location",
                id,
            })?)
    }
}
