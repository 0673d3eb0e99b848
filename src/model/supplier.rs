use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::car::CarFilterDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SupplierDto {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub pay_later: bool,
    pub license_required: bool,
    pub minimum_rental_days: Option<i32>,
    pub price_change_rate: Option<f64>,
    pub supplier_car_limit: Option<i32>,
    pub notify_admin_on_new_car: bool,
    pub car_count: u64,
}

/// Minimal supplier reference used in lists and dropdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SupplierSummaryDto {
    pub id: i32,
    pub full_name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateSupplierDto {
    pub full_name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub pay_later: bool,
    #[serde(default)]
    pub license_required: bool,
    pub minimum_rental_days: Option<i32>,
    pub price_change_rate: Option<f64>,
    pub supplier_car_limit: Option<i32>,
    #[serde(default)]
    pub notify_admin_on_new_car: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedSuppliersDto {
    pub suppliers: Vec<SupplierDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// Storefront lookup of suppliers renting matching cars at a pickup location.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FrontendSuppliersDto {
    pub pickup_location_id: i32,
    #[serde(default)]
    pub filter: CarFilterDto,
}
