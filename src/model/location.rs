use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParkingSpotDto {
    pub id: Option<i32>,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationDto {
    pub id: i32,
    pub country_id: i32,
    pub country_name: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image: Option<String>,
    pub supplier_id: Option<i32>,
    pub parking_spots: Vec<ParkingSpotDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateLocationDto {
    pub country_id: i32,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Name of a previously uploaded temporary image.
    pub image: Option<String>,
    pub supplier_id: Option<i32>,
    #[serde(default)]
    pub parking_spots: Vec<ParkingSpotDto>,
}

/// Replaces the location fields; the parking spot list replaces the stored one.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateLocationDto {
    pub country_id: i32,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub parking_spots: Vec<ParkingSpotDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedLocationsDto {
    pub locations: Vec<LocationDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
