//! Pickup and drop-off locations with their parking spots and image.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{country::CountryRepository, location::LocationRepository},
    error::AppError,
    model::{
        location::{CreateLocationParams, Location, PaginatedLocations, UpdateLocationParams},
        page_count,
    },
    service::storage::{FileStorage, Folder},
    util::validate::validate_name,
};

pub struct LocationService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a FileStorage,
}

impl<'a> LocationService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a FileStorage) -> Self {
        Self { db, storage }
    }

    /// Creates a location. A temporary image named in `params` is moved into place.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Empty name or unknown country
    /// - `Err(AppError::Conflict)` - Name already used
    /// - `Err(AppError::NotFound)` - The temporary image does not exist
    pub async fn create(&self, mut params: CreateLocationParams) -> Result<Location, AppError> {
        params.name = validate_name("Location name", &params.name)?;
        self.check_country(params.country_id).await?;

        let repo = LocationRepository::new(self.db);
        if repo.name_exists(&params.name, None).await? {
            return Err(AppError::Conflict(format!(
                "Location {} already exists",
                params.name
            )));
        }

        let temp_image = params.image.take();
        if let Some(temp) = &temp_image {
            self.storage.check_temp(Folder::Locations, temp).await?;
        }

        let mut location = repo.create(params).await?;

        if let Some(temp) = temp_image {
            let name = self
                .storage
                .promote(Folder::Locations, &temp, location.id)
                .await?;
            repo.set_image(location.id, Some(name.clone())).await?;
            location.image = Some(name);
        }

        Ok(location)
    }

    /// Replaces a location's fields and parking spots; `None` when it does not exist.
    pub async fn update(&self, mut params: UpdateLocationParams) -> Result<Option<Location>, AppError> {
        params.name = validate_name("Location name", &params.name)?;
        self.check_country(params.country_id).await?;

        let repo = LocationRepository::new(self.db);
        if repo.name_exists(&params.name, Some(params.id)).await? {
            return Err(AppError::Conflict(format!(
                "Location {} already exists",
                params.name
            )));
        }

        Ok(repo.update(params).await?)
    }

    async fn check_country(&self, country_id: i32) -> Result<(), AppError> {
        if CountryRepository::new(self.db)
            .get_by_id(country_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "Country {} does not exist",
                country_id
            )));
        }
        Ok(())
    }

    /// Deletes a location nothing refers to, together with its image.
    ///
    /// # Returns
    /// - `Ok(false)` - No location with that id
    /// - `Err(AppError::Conflict)` - A car or booking uses the location
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let repo = LocationRepository::new(self.db);
        let Some(location) = repo.get_by_id(id).await? else {
            return Ok(false);
        };

        if repo.in_use(id).await? {
            return Err(AppError::Conflict(format!(
                "Location {} is used by cars or bookings",
                location.name
            )));
        }

        repo.delete(id).await?;

        if let Some(image) = &location.image {
            if let Err(e) = self.storage.delete(Folder::Locations, image).await {
                tracing::warn!("Failed to delete image of location {}: {}", id, e);
            }
        }

        Ok(true)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Location>, AppError> {
        Ok(LocationRepository::new(self.db).get_by_id(id).await?)
    }

    pub async fn get_paginated(
        &self,
        keyword: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedLocations, AppError> {
        let (locations, total) = LocationRepository::new(self.db)
            .get_paginated(keyword, page, per_page)
            .await?;

        Ok(PaginatedLocations {
            locations,
            total,
            page,
            per_page,
            total_pages: page_count(total, per_page),
        })
    }

    pub async fn in_use(&self, id: i32) -> Result<bool, AppError> {
        Ok(LocationRepository::new(self.db).in_use(id).await?)
    }

    pub async fn get_with_position(&self) -> Result<Vec<Location>, AppError> {
        Ok(LocationRepository::new(self.db).get_with_position().await?)
    }

    pub async fn name_available(&self, name: &str) -> Result<bool, AppError> {
        Ok(!LocationRepository::new(self.db)
            .name_exists(name.trim(), None)
            .await?)
    }

    pub async fn upload_temp_image(&self, original_name: &str, bytes: &[u8]) -> Result<String, AppError> {
        self.storage
            .save_temp(Folder::Locations, original_name, bytes)
            .await
    }

    pub async fn delete_temp_image(&self, name: &str) -> Result<(), AppError> {
        self.storage.delete_temp(Folder::Locations, name).await
    }

    /// Replaces the image of a location; `None` when it does not exist.
    pub async fn update_image(
        &self,
        id: i32,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<Option<String>, AppError> {
        let repo = LocationRepository::new(self.db);
        let Some(location) = repo.get_by_id(id).await? else {
            return Ok(None);
        };

        let name = self
            .storage
            .replace(
                Folder::Locations,
                id,
                original_name,
                bytes,
                location.image.as_deref(),
            )
            .await?;
        repo.set_image(id, Some(name.clone())).await?;

        Ok(Some(name))
    }

    pub async fn delete_image(&self, id: i32) -> Result<bool, AppError> {
        let repo = LocationRepository::new(self.db);
        let Some(location) = repo.get_by_id(id).await? else {
            return Ok(false);
        };

        if let Some(image) = &location.image {
            self.storage.delete(Folder::Locations, image).await?;
        }
        repo.set_image(id, None).await?;

        Ok(true)
    }
}
