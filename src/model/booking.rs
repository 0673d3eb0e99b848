use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::enums::BookingStatus;

/// Extra options selected for a booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingOptionsDto {
    #[serde(default)]
    pub cancellation: bool,
    #[serde(default)]
    pub amendments: bool,
    #[serde(default)]
    pub theft_protection: bool,
    #[serde(default)]
    pub collision_damage_waiver: bool,
    #[serde(default)]
    pub full_insurance: bool,
    #[serde(default)]
    pub additional_driver: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AdditionalDriverDto {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingDto {
    pub id: i32,
    pub supplier_id: i32,
    pub car_id: i32,
    pub driver_id: i32,
    pub pickup_location_id: i32,
    pub drop_off_location_id: i32,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub status: BookingStatus,
    pub options: BookingOptionsDto,
    pub additional_driver: Option<AdditionalDriverDto>,
    pub cancel_request: bool,
    pub price: f64,
    pub is_deposit: bool,
    pub is_payed_in_full: bool,
    pub created_at: DateTime<Utc>,
}

/// Booking with the names of the records it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingDetailDto {
    pub booking: BookingDto,
    pub car_name: String,
    pub car_image: Option<String>,
    pub supplier_name: String,
    pub driver_name: String,
    pub driver_email: String,
    pub pickup_location_name: String,
    pub drop_off_location_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingListItemDto {
    pub id: i32,
    pub status: BookingStatus,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub price: f64,
    pub cancel_request: bool,
    pub car_id: i32,
    pub car_name: String,
    pub supplier_id: i32,
    pub supplier_name: String,
    pub driver_id: i32,
    pub driver_name: String,
    pub pickup_location_name: String,
    pub drop_off_location_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedBookingsDto {
    pub results: Vec<BookingListItemDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// Body for admin/supplier booking creation and update.
///
/// When `price` is omitted it is computed from the car's pricing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingPayloadDto {
    pub car_id: i32,
    pub driver_id: i32,
    pub pickup_location_id: i32,
    pub drop_off_location_id: i32,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub status: BookingStatus,
    #[serde(default)]
    pub options: BookingOptionsDto,
    pub additional_driver: Option<AdditionalDriverDto>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusDto {
    pub ids: Vec<i32>,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BookingSearchDto {
    #[serde(default)]
    pub suppliers: Vec<i32>,
    #[serde(default)]
    pub statuses: Vec<BookingStatus>,
    #[serde(default)]
    pub user: Option<i32>,
    #[serde(default)]
    pub car: Option<i32>,
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pickup_location: Option<i32>,
    #[serde(default)]
    pub drop_off_location: Option<i32>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "crate::model::api::default_entries")]
    pub entries: u64,
}

/// Driver details for a checkout made without an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutDriverDto {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: NaiveDate,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutDto {
    /// Required when the customer is not signed in.
    pub driver: Option<CheckoutDriverDto>,
    pub car_id: i32,
    pub pickup_location_id: i32,
    pub drop_off_location_id: i32,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    #[serde(default)]
    pub options: BookingOptionsDto,
    pub additional_driver: Option<AdditionalDriverDto>,
    #[serde(default)]
    pub pay_later: bool,
    #[serde(default)]
    pub pay_deposit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CheckoutResultDto {
    pub booking_id: i32,
    pub status: BookingStatus,
    /// Present when the booking waits for payment confirmation.
    pub session_id: Option<String>,
    pub price: f64,
    /// Amount charged now: the deposit, the full price, or zero when paying later.
    pub amount_due: f64,
}

/// Payment confirmation coming back from the payment processor.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConfirmCheckoutDto {
    pub payment_intent_id: Option<String>,
    pub customer_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PriceQuoteDto {
    pub car_id: i32,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    #[serde(default)]
    pub options: BookingOptionsDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriceDto {
    pub days: i64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingIdDto {
    pub booking_id: i32,
}
