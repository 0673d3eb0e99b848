//! Country data repository.

use std::collections::HashMap;

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    country::{Country, CountryWithLocations, CreateCountryParams},
    location::Location,
};

pub struct CountryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CountryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateCountryParams) -> Result<Country, DbErr> {
        let entity = entity::country::ActiveModel {
            name: ActiveValue::Set(params.name),
            supplier_id: ActiveValue::Set(params.supplier_id),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Country::from_entity(entity))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Country>, DbErr> {
        let entity = entity::prelude::Country::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Country::from_entity))
    }

    /// Renames a country.
    ///
    /// # Returns
    /// - `Ok(Some(Country))` - The updated country
    /// - `Ok(None)` - No country with that id
    pub async fn update(&self, id: i32, name: String) -> Result<Option<Country>, DbErr> {
        let result = entity::prelude::Country::update_many()
            .filter(entity::country::Column::Id.eq(id))
            .col_expr(entity::country::Column::Name, Expr::value(name))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Deletes a country.
    ///
    /// # Returns
    /// - `Ok(true)` - Country deleted
    /// - `Ok(false)` - No country with that id
    /// - `Err(DbErr)` - Database error, including a location still referencing it
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Country::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Checks whether another country already uses `name`, ignoring `exclude_id`.
    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Country::find().filter(entity::country::Column::Name.eq(name));

        if let Some(id) = exclude_id {
            query = query.filter(entity::country::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// A country is in use as long as a location belongs to it.
    pub async fn in_use(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Location::find()
            .filter(entity::location::Column::CountryId.eq(id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets countries ordered by name.
    ///
    /// # Returns
    /// - `Ok((countries, total))` - Countries of the requested page and total number of matches
    pub async fn get_paginated(
        &self,
        keyword: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Country>, u64), DbErr> {
        let mut query = entity::prelude::Country::find();

        if let Some(keyword) = keyword {
            query = query.filter(entity::country::Column::Name.contains(keyword));
        }

        let paginator = query
            .order_by_asc(entity::country::Column::Name)
            .paginate(self.db, per_page.max(1));

        let total = paginator.num_items().await?;
        let countries = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Country::from_entity)
            .collect();

        Ok((countries, total))
    }

    /// Gets every country that has at least one location, with its locations.
    ///
    /// Countries and their locations are both ordered by name.
    pub async fn get_with_locations(&self) -> Result<Vec<CountryWithLocations>, DbErr> {
        let countries = entity::prelude::Country::find()
            .order_by_asc(entity::country::Column::Name)
            .all(self.db)
            .await?;

        let locations = entity::prelude::Location::find()
            .order_by_asc(entity::location::Column::Name)
            .all(self.db)
            .await?;

        let mut spots_by_location: HashMap<i32, Vec<entity::parking_spot::Model>> = HashMap::new();
        for spot in entity::prelude::ParkingSpot::find()
            .order_by_asc(entity::parking_spot::Column::Id)
            .all(self.db)
            .await?
        {
            spots_by_location.entry(spot.location_id).or_default().push(spot);
        }

        let mut locations_by_country: HashMap<i32, Vec<entity::location::Model>> = HashMap::new();
        for location in locations {
            locations_by_country
                .entry(location.country_id)
                .or_default()
                .push(location);
        }

        let results = countries
            .into_iter()
            .filter_map(|country| {
                let locations = locations_by_country.remove(&country.id)?;
                let locations = locations
                    .into_iter()
                    .map(|location| {
                        let spots = spots_by_location.remove(&location.id).unwrap_or_default();
                        Location::from_entity(location, country.name.clone(), spots)
                    })
                    .collect();

                Some(CountryWithLocations {
                    country: Country::from_entity(country),
                    locations,
                })
            })
            .collect();

        Ok(results)
    }
}
