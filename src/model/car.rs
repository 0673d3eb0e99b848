use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{
    enums::{CarRange, CarType, FuelPolicy, Gearbox, Mileage, Multimedia},
    supplier::SupplierSummaryDto,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DateBasedPriceDto {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CarLocationDto {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CarDto {
    pub id: i32,
    pub supplier: SupplierSummaryDto,
    pub name: String,
    pub minimum_age: i32,
    pub locations: Vec<CarLocationDto>,
    pub daily_price: f64,
    pub discounted_daily_price: Option<f64>,
    pub bi_weekly_price: Option<f64>,
    pub discounted_bi_weekly_price: Option<f64>,
    pub weekly_price: Option<f64>,
    pub discounted_weekly_price: Option<f64>,
    pub monthly_price: Option<f64>,
    pub discounted_monthly_price: Option<f64>,
    pub deposit: f64,
    pub available: bool,
    pub fully_booked: bool,
    pub coming_soon: bool,
    pub car_type: CarType,
    pub gearbox: Gearbox,
    pub aircon: bool,
    pub image: Option<String>,
    pub seats: i32,
    pub doors: i32,
    pub fuel_policy: FuelPolicy,
    pub mileage: i32,
    pub cancellation: f64,
    pub amendments: f64,
    pub theft_protection: f64,
    pub collision_damage_waiver: f64,
    pub full_insurance: f64,
    pub additional_driver: f64,
    pub range: CarRange,
    pub multimedia: Vec<Multimedia>,
    pub rating: Option<f64>,
    pub co2: Option<f64>,
    pub trips: i32,
    pub is_date_based_price: bool,
    pub date_based_prices: Vec<DateBasedPriceDto>,
    pub created_at: DateTime<Utc>,
}

/// Body for both car creation and update.
///
/// On creation `supplier_id` selects the owner (ignored for suppliers, who always own
/// the cars they create) and `image` names a temporary upload to promote.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CarPayloadDto {
    pub supplier_id: i32,
    pub name: String,
    pub minimum_age: i32,
    pub locations: Vec<i32>,
    pub daily_price: f64,
    pub discounted_daily_price: Option<f64>,
    pub bi_weekly_price: Option<f64>,
    pub discounted_bi_weekly_price: Option<f64>,
    pub weekly_price: Option<f64>,
    pub discounted_weekly_price: Option<f64>,
    pub monthly_price: Option<f64>,
    pub discounted_monthly_price: Option<f64>,
    pub deposit: f64,
    pub available: bool,
    #[serde(default)]
    pub fully_booked: bool,
    #[serde(default)]
    pub coming_soon: bool,
    pub car_type: CarType,
    pub gearbox: Gearbox,
    pub aircon: bool,
    pub image: Option<String>,
    pub seats: i32,
    pub doors: i32,
    pub fuel_policy: FuelPolicy,
    pub mileage: i32,
    pub cancellation: f64,
    pub amendments: f64,
    pub theft_protection: f64,
    pub collision_damage_waiver: f64,
    pub full_insurance: f64,
    pub additional_driver: f64,
    pub range: CarRange,
    #[serde(default)]
    pub multimedia: Vec<Multimedia>,
    pub rating: Option<f64>,
    pub co2: Option<f64>,
    #[serde(default)]
    pub is_date_based_price: bool,
    #[serde(default)]
    pub date_based_prices: Vec<DateBasedPriceDto>,
}

/// Filters shared by the admin search, the storefront search and supplier lookups.
///
/// Empty lists and `None` values do not filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CarFilterDto {
    #[serde(default)]
    pub suppliers: Vec<i32>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub car_types: Vec<CarType>,
    #[serde(default)]
    pub gearboxes: Vec<Gearbox>,
    #[serde(default)]
    pub mileage: Option<Mileage>,
    #[serde(default)]
    pub fuel_policies: Vec<FuelPolicy>,
    /// Maximum deposit.
    #[serde(default)]
    pub deposit: Option<f64>,
    /// Restrict to available (`true`) or unavailable (`false`) cars.
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub ranges: Vec<CarRange>,
    /// Cars must provide every listed multimedia feature.
    #[serde(default)]
    pub multimedia: Vec<Multimedia>,
    /// Minimum rating.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Minimum number of seats.
    #[serde(default)]
    pub seats: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CarSearchDto {
    #[serde(default)]
    pub filter: CarFilterDto,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "crate::model::api::default_entries")]
    pub entries: u64,
}

/// Cars a supplier can offer at a pickup location (admin booking form).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingCarsDto {
    pub supplier_id: i32,
    pub pickup_location_id: i32,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "crate::model::api::default_entries")]
    pub entries: u64,
}

/// Storefront search for cars that can be rented for a date range.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FrontendCarSearchDto {
    pub pickup_location_id: i32,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    #[serde(default)]
    pub filter: CarFilterDto,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "crate::model::api::default_entries")]
    pub entries: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedCarsDto {
    pub cars: Vec<CarDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
