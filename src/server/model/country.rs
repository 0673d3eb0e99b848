//! Country domain models and parameters.

use crate::{
    model::country::{
        CountryDto, CountryWithLocationsDto, CreateCountryDto, PaginatedCountriesDto,
    },
    server::model::location::Location,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub id: i32,
    pub name: String,
    /// Supplier that created the country, if any.
    pub supplier_id: Option<i32>,
}

impl Country {
    pub fn from_entity(entity: entity::country::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            supplier_id: entity.supplier_id,
        }
    }

    pub fn into_dto(self) -> CountryDto {
        CountryDto {
            id: self.id,
            name: self.name,
            supplier_id: self.supplier_id,
        }
    }
}

/// Country together with every location it contains.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryWithLocations {
    pub country: Country,
    pub locations: Vec<Location>,
}

impl CountryWithLocations {
    pub fn into_dto(self) -> CountryWithLocationsDto {
        CountryWithLocationsDto {
            id: self.country.id,
            name: self.country.name,
            locations: self.locations.into_iter().map(Location::into_dto).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedCountries {
    pub countries: Vec<Country>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedCountries {
    pub fn into_dto(self) -> PaginatedCountriesDto {
        PaginatedCountriesDto {
            countries: self.countries.into_iter().map(Country::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCountryParams {
    pub name: String,
    pub supplier_id: Option<i32>,
}

impl CreateCountryParams {
    pub fn from_dto(dto: CreateCountryDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            supplier_id: dto.supplier_id,
        }
    }
}
