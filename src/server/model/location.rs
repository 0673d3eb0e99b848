//! Location domain models and parameters.
//!
//! A location belongs to a country and carries an optional map position, an image
//! and a list of parking spots where cars are handed over.

use crate::model::location::{
    CreateLocationDto, LocationDto, PaginatedLocationsDto, ParkingSpotDto, UpdateLocationDto,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ParkingSpot {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ParkingSpot {
    pub fn from_entity(entity: entity::parking_spot::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            latitude: entity.latitude,
            longitude: entity.longitude,
        }
    }

    pub fn into_dto(self) -> ParkingSpotDto {
        ParkingSpotDto {
            id: Some(self.id),
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Location with its country name and parking spots resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: i32,
    pub country_id: i32,
    pub country_name: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image: Option<String>,
    pub supplier_id: Option<i32>,
    pub parking_spots: Vec<ParkingSpot>,
}

impl Location {
    /// Converts entity models to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The location row
    /// - `country_name` - Name of the country the location belongs to
    /// - `parking_spots` - Parking spot rows of the location
    pub fn from_entity(
        entity: entity::location::Model,
        country_name: String,
        parking_spots: Vec<entity::parking_spot::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            country_id: entity.country_id,
            country_name,
            name: entity.name,
            latitude: entity.latitude,
            longitude: entity.longitude,
            image: entity.image,
            supplier_id: entity.supplier_id,
            parking_spots: parking_spots
                .into_iter()
                .map(ParkingSpot::from_entity)
                .collect(),
        }
    }

    pub fn into_dto(self) -> LocationDto {
        LocationDto {
            id: self.id,
            country_id: self.country_id,
            country_name: self.country_name,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            image: self.image,
            supplier_id: self.supplier_id,
            parking_spots: self
                .parking_spots
                .into_iter()
                .map(ParkingSpot::into_dto)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedLocations {
    pub locations: Vec<Location>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedLocations {
    pub fn into_dto(self) -> PaginatedLocationsDto {
        PaginatedLocationsDto {
            locations: self.locations.into_iter().map(Location::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Parking spot to store with a location. Spots are always replaced as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingSpotParams {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ParkingSpotParams {
    pub fn from_dto(dto: ParkingSpotDto) -> Self {
        Self {
            name: dto.name,
            latitude: dto.latitude,
            longitude: dto.longitude,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateLocationParams {
    pub country_id: i32,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Final file name of the image, already promoted out of the temp folder.
    pub image: Option<String>,
    pub supplier_id: Option<i32>,
    pub parking_spots: Vec<ParkingSpotParams>,
}

impl CreateLocationParams {
    pub fn from_dto(dto: CreateLocationDto) -> Self {
        Self {
            country_id: dto.country_id,
            name: dto.name.trim().to_string(),
            latitude: dto.latitude,
            longitude: dto.longitude,
            image: dto.image,
            supplier_id: dto.supplier_id,
            parking_spots: dto
                .parking_spots
                .into_iter()
                .map(ParkingSpotParams::from_dto)
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateLocationParams {
    pub id: i32,
    pub country_id: i32,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub parking_spots: Vec<ParkingSpotParams>,
}

impl UpdateLocationParams {
    pub fn from_dto(id: i32, dto: UpdateLocationDto) -> Self {
        Self {
            id,
            country_id: dto.country_id,
            name: dto.name.trim().to_string(),
            latitude: dto.latitude,
            longitude: dto.longitude,
            parking_spots: dto
                .parking_spots
                .into_iter()
                .map(ParkingSpotParams::from_dto)
                .collect(),
        }
    }
}
