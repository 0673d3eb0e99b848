use sea_orm::DatabaseConnection;

use crate::server::{
    data::country::CountryRepository,
    error::AppError,
    model::{
        country::{Country, CountryWithLocations, CreateCountryParams, PaginatedCountries},
        page_count,
    },
    util::validate::validate_name,
};

pub struct CountryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CountryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a country with a unique name.
    ///
    /// # Returns
    /// - `Err(AppError::Conflict)` - A country with that name exists
    pub async fn create(&self, mut params: CreateCountryParams) -> Result<Country, AppError> {
        params.name = validate_name("Country name", &params.name)?;

        let repo = CountryRepository::new(self.db);
        if repo.name_exists(&params.name, None).await? {
            return Err(AppError::Conflict(format!(
                "Country {} already exists",
                params.name
            )));
        }

        Ok(repo.create(params).await?)
    }

    /// Renames a country; `None` when it does not exist.
    pub async fn update(&self, id: i32, name: &str) -> Result<Option<Country>, AppError> {
        let name = validate_name("Country name", name)?;

        let repo = CountryRepository::new(self.db);
        if repo.name_exists(&name, Some(id)).await? {
            return Err(AppError::Conflict(format!("Country {} already exists", name)));
        }

        Ok(repo.update(id, name).await?)
    }

    /// Deletes a country that no location refers to.
    ///
    /// # Returns
    /// - `Ok(false)` - No country with that id
    /// - `Err(AppError::Conflict)` - Locations still belong to the country
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let repo = CountryRepository::new(self.db);
        if repo.in_use(id).await? {
            return Err(AppError::Conflict(format!(
                "Country {} still has locations",
                id
            )));
        }

        Ok(repo.delete(id).await?)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Country>, AppError> {
        Ok(CountryRepository::new(self.db).get_by_id(id).await?)
    }

    pub async fn get_paginated(
        &self,
        keyword: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedCountries, AppError> {
        let (countries, total) = CountryRepository::new(self.db)
            .get_paginated(keyword, page, per_page)
            .await?;

        Ok(PaginatedCountries {
            countries,
            total,
            page,
            per_page,
            total_pages: page_count(total, per_page),
        })
    }

    pub async fn in_use(&self, id: i32) -> Result<bool, AppError> {
        Ok(CountryRepository::new(self.db).in_use(id).await?)
    }

    pub async fn get_with_locations(&self) -> Result<Vec<CountryWithLocations>, AppError> {
        Ok(CountryRepository::new(self.db).get_with_locations().await?)
    }

    /// Whether a name is free for a new country.
    pub async fn name_available(&self, name: &str) -> Result<bool, AppError> {
        Ok(!CountryRepository::new(self.db)
            .name_exists(name.trim(), None)
            .await?)
    }
}
