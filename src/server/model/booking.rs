//! Booking domain models and parameters.
//!
//! Provides the booking model with its parsed status and selected options, the
//! detail and list projections used by the back-office, and parameter types for
//! creation, update and search.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    model::{
        booking::{
            AdditionalDriverDto, BookingDetailDto, BookingDto, BookingListItemDto,
            BookingOptionsDto, BookingPayloadDto, BookingSearchDto, CheckoutDriverDto,
            CheckoutDto, CheckoutResultDto, PaginatedBookingsDto,
        },
        enums::BookingStatus,
    },
    server::{error::AppError, util::parse::parse_stored},
};

/// Extra options a driver selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingOptions {
    pub cancellation: bool,
    pub amendments: bool,
    pub theft_protection: bool,
    pub collision_damage_waiver: bool,
    pub full_insurance: bool,
    pub additional_driver: bool,
}

impl BookingOptions {
    pub fn from_dto(dto: BookingOptionsDto) -> Self {
        Self {
            cancellation: dto.cancellation,
            amendments: dto.amendments,
            theft_protection: dto.theft_protection,
            collision_damage_waiver: dto.collision_damage_waiver,
            full_insurance: dto.full_insurance,
            additional_driver: dto.additional_driver,
        }
    }

    pub fn into_dto(self) -> BookingOptionsDto {
        BookingOptionsDto {
            cancellation: self.cancellation,
            amendments: self.amendments,
            theft_protection: self.theft_protection,
            collision_damage_waiver: self.collision_damage_waiver,
            full_insurance: self.full_insurance,
            additional_driver: self.additional_driver,
        }
    }
}

/// Second driver registered on a booking.
#[derive(Debug, Clone, PartialEq)]
pub struct AdditionalDriver {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
}

impl AdditionalDriver {
    pub fn from_entity(entity: entity::additional_driver::Model) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            email: entity.email,
            phone: entity.phone,
            birth_date: entity.birth_date,
        }
    }

    pub fn into_dto(self) -> AdditionalDriverDto {
        AdditionalDriverDto {
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            birth_date: self.birth_date,
        }
    }
}

/// Additional driver details to store with a booking.
#[derive(Debug, Clone, PartialEq)]
pub struct AdditionalDriverParams {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
}

impl AdditionalDriverParams {
    pub fn from_dto(dto: AdditionalDriverDto) -> Self {
        Self {
            full_name: dto.full_name.trim().to_string(),
            email: dto.email.trim().to_lowercase(),
            phone: dto.phone.trim().to_string(),
            birth_date: dto.birth_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: i32,
    pub supplier_id: i32,
    pub car_id: i32,
    pub driver_id: i32,
    pub pickup_location_id: i32,
    pub drop_off_location_id: i32,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub status: BookingStatus,
    pub options: BookingOptions,
    pub additional_driver_id: Option<i32>,
    pub cancel_request: bool,
    pub price: f64,
    /// Checkout session waiting for payment confirmation.
    pub session_id: Option<String>,
    pub payment_intent_id: Option<String>,
    pub customer_id: Option<String>,
    /// Set while the booking is `void`; the booking is purged once it passes.
    pub expire_at: Option<DateTime<Utc>>,
    pub is_deposit: bool,
    pub is_payed_in_full: bool,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Converts an entity model to a booking domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Booking)` - The converted domain model
    /// - `Err(AppError::InternalErr)` - The stored status is unknown
    pub fn from_entity(entity: entity::booking::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            supplier_id: entity.supplier_id,
            car_id: entity.car_id,
            driver_id: entity.driver_id,
            pickup_location_id: entity.pickup_location_id,
            drop_off_location_id: entity.drop_off_location_id,
            from: entity.from_date,
            to: entity.to_date,
            status: parse_stored("booking.status", &entity.status)?,
            options: BookingOptions {
                cancellation: entity.cancellation,
                amendments: entity.amendments,
                theft_protection: entity.theft_protection,
                collision_damage_waiver: entity.collision_damage_waiver,
                full_insurance: entity.full_insurance,
                additional_driver: entity.additional_driver,
            },
            additional_driver_id: entity.additional_driver_id,
            cancel_request: entity.cancel_request,
            price: entity.price,
            session_id: entity.session_id,
            payment_intent_id: entity.payment_intent_id,
            customer_id: entity.customer_id,
            expire_at: entity.expire_at,
            is_deposit: entity.is_deposit,
            is_payed_in_full: entity.is_payed_in_full,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self, additional_driver: Option<AdditionalDriver>) -> BookingDto {
        BookingDto {
            id: self.id,
            supplier_id: self.supplier_id,
            car_id: self.car_id,
            driver_id: self.driver_id,
            pickup_location_id: self.pickup_location_id,
            drop_off_location_id: self.drop_off_location_id,
            from: self.from,
            to: self.to,
            status: self.status,
            options: self.options.into_dto(),
            additional_driver: additional_driver.map(AdditionalDriver::into_dto),
            cancel_request: self.cancel_request,
            price: self.price,
            is_deposit: self.is_deposit,
            is_payed_in_full: self.is_payed_in_full,
            created_at: self.created_at,
        }
    }
}

/// Booking with the names of the records it references.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDetail {
    pub booking: Booking,
    pub additional_driver: Option<AdditionalDriver>,
    pub car_name: String,
    pub car_image: Option<String>,
    pub supplier_name: String,
    pub driver_name: String,
    pub driver_email: String,
    pub pickup_location_name: String,
    pub drop_off_location_name: String,
}

impl BookingDetail {
    pub fn into_dto(self) -> BookingDetailDto {
        BookingDetailDto {
            booking: self.booking.into_dto(self.additional_driver),
            car_name: self.car_name,
            car_image: self.car_image,
            supplier_name: self.supplier_name,
            driver_name: self.driver_name,
            driver_email: self.driver_email,
            pickup_location_name: self.pickup_location_name,
            drop_off_location_name: self.drop_off_location_name,
        }
    }
}

/// Row of the back-office booking list.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingListItem {
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

impl BookingListItem {
    pub fn into_dto(self) -> BookingListItemDto {
        BookingListItemDto {
            id: self.id,
            status: self.status,
            from: self.from,
            to: self.to,
            price: self.price,
            cancel_request: self.cancel_request,
            car_id: self.car_id,
            car_name: self.car_name,
            supplier_id: self.supplier_id,
            supplier_name: self.supplier_name,
            driver_id: self.driver_id,
            driver_name: self.driver_name,
            pickup_location_name: self.pickup_location_name,
            drop_off_location_name: self.drop_off_location_name,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedBookings {
    pub results: Vec<BookingListItem>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedBookings {
    pub fn into_dto(self) -> PaginatedBookingsDto {
        PaginatedBookingsDto {
            results: self.results.into_iter().map(BookingListItem::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Fields of a new booking row.
#[derive(Debug, Clone)]
pub struct CreateBookingParams {
    pub supplier_id: i32,
    pub car_id: i32,
    pub driver_id: i32,
    pub pickup_location_id: i32,
    pub drop_off_location_id: i32,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub status: BookingStatus,
    pub options: BookingOptions,
    pub additional_driver_id: Option<i32>,
    pub price: f64,
    pub session_id: Option<String>,
    pub expire_at: Option<DateTime<Utc>>,
    pub is_deposit: bool,
    pub is_payed_in_full: bool,
}

/// Replacement fields for an existing booking.
#[derive(Debug, Clone)]
pub struct UpdateBookingParams {
    pub id: i32,
    pub supplier_id: i32,
    pub car_id: i32,
    pub driver_id: i32,
    pub pickup_location_id: i32,
    pub drop_off_location_id: i32,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub status: BookingStatus,
    pub options: BookingOptions,
    pub additional_driver_id: Option<i32>,
    pub price: f64,
}

/// Payment details recorded when a checkout session is confirmed.
#[derive(Debug, Clone)]
pub struct ConfirmPaymentParams {
    pub status: BookingStatus,
    pub payment_intent_id: Option<String>,
    pub customer_id: Option<String>,
    pub is_deposit: bool,
    pub is_payed_in_full: bool,
}

/// Booking search filters; empty lists and `None` do not restrict the results.
#[derive(Debug, Clone, Default)]
pub struct BookingSearchParams {
    pub suppliers: Vec<i32>,
    pub statuses: Vec<BookingStatus>,
    pub driver_id: Option<i32>,
    pub car_id: Option<i32>,
    /// Bookings starting on or after this instant.
    pub from: Option<DateTime<Utc>>,
    /// Bookings ending on or before this instant.
    pub to: Option<DateTime<Utc>>,
    pub pickup_location_id: Option<i32>,
    pub drop_off_location_id: Option<i32>,
    /// Booking id, car name, driver name or supplier name.
    pub keyword: Option<String>,
    pub page: u64,
    pub per_page: u64,
}

impl BookingSearchParams {
    pub fn from_dto(dto: BookingSearchDto) -> Self {
        Self {
            suppliers: dto.suppliers,
            statuses: dto.statuses,
            driver_id: dto.user,
            car_id: dto.car,
            from: dto.from,
            to: dto.to,
            pickup_location_id: dto.pickup_location,
            drop_off_location_id: dto.drop_off_location,
            keyword: dto
                .keyword
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            page: dto.page,
            per_page: dto.entries,
        }
    }
}

/// Booking entered from the back-office. A missing price is computed from the car.
#[derive(Debug, Clone)]
pub struct BookingPayload {
    pub car_id: i32,
    pub driver_id: i32,
    pub pickup_location_id: i32,
    pub drop_off_location_id: i32,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub status: BookingStatus,
    pub options: BookingOptions,
    pub additional_driver: Option<AdditionalDriverParams>,
    pub price: Option<f64>,
}

impl BookingPayload {
    pub fn from_dto(dto: BookingPayloadDto) -> Self {
        Self {
            car_id: dto.car_id,
            driver_id: dto.driver_id,
            pickup_location_id: dto.pickup_location_id,
            drop_off_location_id: dto.drop_off_location_id,
            from: dto.from,
            to: dto.to,
            status: dto.status,
            options: BookingOptions::from_dto(dto.options),
            additional_driver: dto.additional_driver.map(AdditionalDriverParams::from_dto),
            price: dto.price,
        }
    }
}

/// Driver of a checkout made without an account.
#[derive(Debug, Clone)]
pub struct CheckoutDriver {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: NaiveDate,
    pub language: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CheckoutParams {
    pub driver: Option<CheckoutDriver>,
    pub car_id: i32,
    pub pickup_location_id: i32,
    pub drop_off_location_id: i32,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub options: BookingOptions,
    pub additional_driver: Option<AdditionalDriverParams>,
    pub pay_later: bool,
    pub pay_deposit: bool,
}

impl CheckoutParams {
    pub fn from_dto(dto: CheckoutDto) -> Self {
        Self {
            driver: dto.driver.map(|d: CheckoutDriverDto| CheckoutDriver {
                full_name: d.full_name,
                email: d.email,
                phone: d.phone,
                birth_date: d.birth_date,
                language: d.language,
            }),
            car_id: dto.car_id,
            pickup_location_id: dto.pickup_location_id,
            drop_off_location_id: dto.drop_off_location_id,
            from: dto.from,
            to: dto.to,
            options: BookingOptions::from_dto(dto.options),
            additional_driver: dto.additional_driver.map(AdditionalDriverParams::from_dto),
            pay_later: dto.pay_later,
            pay_deposit: dto.pay_deposit,
        }
    }
}

/// Outcome of a checkout.
#[derive(Debug, Clone)]
pub struct CheckoutResult {
    pub booking: Booking,
    /// Amount to charge now: the deposit, the full price, or zero when paying later.
    pub amount_due: f64,
}

impl CheckoutResult {
    pub fn into_dto(self) -> CheckoutResultDto {
        CheckoutResultDto {
            booking_id: self.booking.id,
            status: self.booking.status,
            session_id: self.booking.session_id,
            price: self.booking.price,
            amount_due: self.amount_due,
        }
    }
}
