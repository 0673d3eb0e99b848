//! Location data repository.
//!
//! Locations are always returned with their country name and parking spots. The
//! parking spot list is owned by the location and replaced as a whole on update.

use std::collections::HashMap;

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::location::{
    CreateLocationParams, Location, ParkingSpotParams, UpdateLocationParams,
};

pub struct LocationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LocationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a location with its parking spots.
    pub async fn create(&self, params: CreateLocationParams) -> Result<Location, DbErr> {
        let location = entity::location::ActiveModel {
            country_id: ActiveValue::Set(params.country_id),
            name: ActiveValue::Set(params.name),
            latitude: ActiveValue::Set(params.latitude),
            longitude: ActiveValue::Set(params.longitude),
            image: ActiveValue::Set(params.image),
            supplier_id: ActiveValue::Set(params.supplier_id),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.insert_parking_spots(location.id, params.parking_spots)
            .await?;

        self.get_by_id(location.id)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Location with id {} not found after creation",
                location.id
            )))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Location>, DbErr> {
        let Some(location) = entity::prelude::Location::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        Ok(self.resolve(vec![location]).await?.into_iter().next())
    }

    /// Replaces the location fields and its parking spots.
    ///
    /// # Returns
    /// - `Ok(Some(Location))` - The updated location
    /// - `Ok(None)` - No location with that id
    pub async fn update(&self, params: UpdateLocationParams) -> Result<Option<Location>, DbErr> {
        let Some(existing) = entity::prelude::Location::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::location::ActiveModel = existing.into();
        active.country_id = ActiveValue::Set(params.country_id);
        active.name = ActiveValue::Set(params.name);
        active.latitude = ActiveValue::Set(params.latitude);
        active.longitude = ActiveValue::Set(params.longitude);
        active.update(self.db).await?;

        entity::prelude::ParkingSpot::delete_many()
            .filter(entity::parking_spot::Column::LocationId.eq(params.id))
            .exec(self.db)
            .await?;
        self.insert_parking_spots(params.id, params.parking_spots)
            .await?;

        self.get_by_id(params.id).await
    }

    pub async fn set_image(&self, id: i32, image: Option<String>) -> Result<(), DbErr> {
        entity::prelude::Location::update_many()
            .filter(entity::location::Column::Id.eq(id))
            .col_expr(entity::location::Column::Image, Expr::value(image))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Deletes a location; its parking spots follow through the foreign key.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Location::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Location::find().filter(entity::location::Column::Name.eq(name));

        if let Some(id) = exclude_id {
            query = query.filter(entity::location::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// A location is in use when a car is served there or a booking starts or ends there.
    pub async fn in_use(&self, id: i32) -> Result<bool, DbErr> {
        let cars = entity::prelude::CarLocation::find()
            .filter(entity::car_location::Column::LocationId.eq(id))
            .count(self.db)
            .await?;
        if cars > 0 {
            return Ok(true);
        }

        let bookings = entity::prelude::Booking::find()
            .filter(
                Condition::any()
                    .add(entity::booking::Column::PickupLocationId.eq(id))
                    .add(entity::booking::Column::DropOffLocationId.eq(id)),
            )
            .count(self.db)
            .await?;

        Ok(bookings > 0)
    }

    /// Gets locations ordered by name; the keyword matches the location name.
    pub async fn get_paginated(
        &self,
        keyword: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Location>, u64), DbErr> {
        let mut query = entity::prelude::Location::find();

        if let Some(keyword) = keyword {
            query = query.filter(entity::location::Column::Name.contains(keyword));
        }

        let paginator = query
            .order_by_asc(entity::location::Column::Name)
            .paginate(self.db, per_page.max(1));

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((self.resolve(entities).await?, total))
    }

    /// Gets every location with both coordinates set, for map display.
    pub async fn get_with_position(&self) -> Result<Vec<Location>, DbErr> {
        let entities = entity::prelude::Location::find()
            .filter(entity::location::Column::Latitude.is_not_null())
            .filter(entity::location::Column::Longitude.is_not_null())
            .order_by_asc(entity::location::Column::Name)
            .all(self.db)
            .await?;

        self.resolve(entities).await
    }

    async fn insert_parking_spots(
        &self,
        location_id: i32,
        spots: Vec<ParkingSpotParams>,
    ) -> Result<(), DbErr> {
        if spots.is_empty() {
            return Ok(());
        }

        let models = spots.into_iter().map(|spot| entity::parking_spot::ActiveModel {
            location_id: ActiveValue::Set(location_id),
            name: ActiveValue::Set(spot.name),
            latitude: ActiveValue::Set(spot.latitude),
            longitude: ActiveValue::Set(spot.longitude),
            ..Default::default()
        });

        entity::prelude::ParkingSpot::insert_many(models)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Attaches country names and parking spots to location rows, keeping their order.
    async fn resolve(&self, entities: Vec<entity::location::Model>) -> Result<Vec<Location>, DbErr> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let country_ids: Vec<i32> = entities.iter().map(|l| l.country_id).collect();
        let countries: HashMap<i32, String> = entity::prelude::Country::find()
            .filter(entity::country::Column::Id.is_in(country_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let location_ids: Vec<i32> = entities.iter().map(|l| l.id).collect();
        let mut spots: HashMap<i32, Vec<entity::parking_spot::Model>> = HashMap::new();
        for spot in entity::prelude::ParkingSpot::find()
            .filter(entity::parking_spot::Column::LocationId.is_in(location_ids))
            .order_by_asc(entity::parking_spot::Column::Id)
            .all(self.db)
            .await?
        {
            spots.entry(spot.location_id).or_default().push(spot);
        }

        Ok(entities
            .into_iter()
            .map(|location| {
                let country_name = countries
                    .get(&location.country_id)
                    .cloned()
                    .unwrap_or_default();
                let location_spots = spots.remove(&location.id).unwrap_or_default();
                Location::from_entity(location, country_name, location_spots)
            })
            .collect())
    }
}
