//! Location factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test locations.
///
/// # Example
///
/// ```rust,ignore
/// let location = LocationFactory::new(&db, country.id)
///     .name("Airport")
///     .position(Some((36.8, 10.2)))
///     .build()
///     .await?;
/// ```
pub struct LocationFactory<'a> {
    db: &'a DatabaseConnection,
    country_id: i32,
    name: String,
    position: Option<(f64, f64)>,
    image: Option<String>,
}

impl<'a> LocationFactory<'a> {
    /// Defaults: name `"Location {id}"`, no coordinates, no image.
    pub fn new(db: &'a DatabaseConnection, country_id: i32) -> Self {
        Self {
            db,
            country_id,
            name: format!("Location {}", next_id()),
            position: None,
            image: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets latitude and longitude.
    pub fn position(mut self, position: Option<(f64, f64)>) -> Self {
        self.position = position;
        self
    }

    pub fn image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    pub async fn build(self) -> Result<entity::location::Model, DbErr> {
        entity::location::ActiveModel {
            id: ActiveValue::NotSet,
            country_id: ActiveValue::Set(self.country_id),
            name: ActiveValue::Set(self.name),
            latitude: ActiveValue::Set(self.position.map(|(lat, _)| lat)),
            longitude: ActiveValue::Set(self.position.map(|(_, lng)| lng)),
            image: ActiveValue::Set(self.image),
            supplier_id: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a location with default values in the given country.
pub async fn create_location(
    db: &DatabaseConnection,
    country_id: i32,
) -> Result<entity::location::Model, DbErr> {
    LocationFactory::new(db, country_id).build().await
}
