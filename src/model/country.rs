use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::location::LocationDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CountryDto {
    pub id: i32,
    pub name: String,
    pub supplier_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CountryWithLocationsDto {
    pub id: i32,
    pub name: String,
    pub locations: Vec<LocationDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCountryDto {
    pub name: String,
    pub supplier_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateCountryDto {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedCountriesDto {
    pub countries: Vec<CountryDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
