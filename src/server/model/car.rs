//! Car domain models and parameters.
//!
//! Provides the car model with its owner, served locations and date based prices
//! resolved, the payload used for both creation and update, and the filter shared
//! by the admin search, the storefront search and the supplier lookup.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    model::{
        car::{
            CarDto, CarFilterDto, CarLocationDto, CarPayloadDto, DateBasedPriceDto,
            PaginatedCarsDto,
        },
        enums::{CarRange, CarType, FuelPolicy, Gearbox, Mileage, Multimedia},
    },
    server::{
        error::AppError,
        model::user::User,
        util::parse::{parse_multimedia, parse_stored},
    },
};

/// Daily price override for a calendar range, both ends inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct DateBasedPrice {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_price: f64,
}

impl DateBasedPrice {
    pub fn from_entity(entity: entity::date_based_price::Model) -> Self {
        Self {
            start_date: entity.start_date,
            end_date: entity.end_date,
            daily_price: entity.daily_price,
        }
    }

    pub fn from_dto(dto: DateBasedPriceDto) -> Self {
        Self {
            start_date: dto.start_date,
            end_date: dto.end_date,
            daily_price: dto.daily_price,
        }
    }

    pub fn into_dto(self) -> DateBasedPriceDto {
        DateBasedPriceDto {
            start_date: self.start_date,
            end_date: self.end_date,
            daily_price: self.daily_price,
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }
}

/// Location a car can be picked up from.
#[derive(Debug, Clone, PartialEq)]
pub struct CarLocation {
    pub id: i32,
    pub name: String,
}

/// Car with supplier, locations and date based prices.
///
/// Option prices follow the stored convention: -1 means the option is not offered,
/// 0 means it is included for free.
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub id: i32,
    pub supplier: User,
    pub name: String,
    pub minimum_age: i32,
    pub locations: Vec<CarLocation>,
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
    /// Kilometres allowed; -1 for unlimited.
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
    pub date_based_prices: Vec<DateBasedPrice>,
    pub created_at: DateTime<Utc>,
}

impl Car {
    /// Converts entity models to a car domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The car row
    /// - `supplier` - Owner of the car
    /// - `locations` - Locations linked through `car_location`
    /// - `date_based_prices` - Price ranges of the car
    ///
    /// # Returns
    /// - `Ok(Car)` - The converted domain model
    /// - `Err(AppError::InternalErr)` - An enumerated column holds an unknown value
    pub fn from_entity(
        entity: entity::car::Model,
        supplier: User,
        locations: Vec<entity::location::Model>,
        date_based_prices: Vec<entity::date_based_price::Model>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            supplier,
            name: entity.name,
            minimum_age: entity.minimum_age,
            locations: locations
                .into_iter()
                .map(|l| CarLocation {
                    id: l.id,
                    name: l.name,
                })
                .collect(),
            daily_price: entity.daily_price,
            discounted_daily_price: entity.discounted_daily_price,
            bi_weekly_price: entity.bi_weekly_price,
            discounted_bi_weekly_price: entity.discounted_bi_weekly_price,
            weekly_price: entity.weekly_price,
            discounted_weekly_price: entity.discounted_weekly_price,
            monthly_price: entity.monthly_price,
            discounted_monthly_price: entity.discounted_monthly_price,
            deposit: entity.deposit,
            available: entity.available,
            fully_booked: entity.fully_booked,
            coming_soon: entity.coming_soon,
            car_type: parse_stored("car.car_type", &entity.car_type)?,
            gearbox: parse_stored("car.gearbox", &entity.gearbox)?,
            aircon: entity.aircon,
            image: entity.image,
            seats: entity.seats,
            doors: entity.doors,
            fuel_policy: parse_stored("car.fuel_policy", &entity.fuel_policy)?,
            mileage: entity.mileage,
            cancellation: entity.cancellation,
            amendments: entity.amendments,
            theft_protection: entity.theft_protection,
            collision_damage_waiver: entity.collision_damage_waiver,
            full_insurance: entity.full_insurance,
            additional_driver: entity.additional_driver,
            range: parse_stored("car.range", &entity.range)?,
            multimedia: parse_multimedia(&entity.multimedia)?,
            rating: entity.rating,
            co2: entity.co2,
            trips: entity.trips,
            is_date_based_price: entity.is_date_based_price,
            date_based_prices: date_based_prices
                .into_iter()
                .map(DateBasedPrice::from_entity)
                .collect(),
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> CarDto {
        CarDto {
            id: self.id,
            supplier: self.supplier.into_summary_dto(),
            name: self.name,
            minimum_age: self.minimum_age,
            locations: self
                .locations
                .into_iter()
                .map(|l| CarLocationDto {
                    id: l.id,
                    name: l.name,
                })
                .collect(),
            daily_price: self.daily_price,
            discounted_daily_price: self.discounted_daily_price,
            bi_weekly_price: self.bi_weekly_price,
            discounted_bi_weekly_price: self.discounted_bi_weekly_price,
            weekly_price: self.weekly_price,
            discounted_weekly_price: self.discounted_weekly_price,
            monthly_price: self.monthly_price,
            discounted_monthly_price: self.discounted_monthly_price,
            deposit: self.deposit,
            available: self.available,
            fully_booked: self.fully_booked,
            coming_soon: self.coming_soon,
            car_type: self.car_type,
            gearbox: self.gearbox,
            aircon: self.aircon,
            image: self.image,
            seats: self.seats,
            doors: self.doors,
            fuel_policy: self.fuel_policy,
            mileage: self.mileage,
            cancellation: self.cancellation,
            amendments: self.amendments,
            theft_protection: self.theft_protection,
            collision_damage_waiver: self.collision_damage_waiver,
            full_insurance: self.full_insurance,
            additional_driver: self.additional_driver,
            range: self.range,
            multimedia: self.multimedia,
            rating: self.rating,
            co2: self.co2,
            trips: self.trips,
            is_date_based_price: self.is_date_based_price,
            date_based_prices: self
                .date_based_prices
                .into_iter()
                .map(DateBasedPrice::into_dto)
                .collect(),
            created_at: self.created_at,
        }
    }

    pub fn serves_location(&self, location_id: i32) -> bool {
        self.locations.iter().any(|l| l.id == location_id)
    }

    /// Whether the driver may add a second driver to a booking of this car.
    pub fn offers_additional_driver(&self) -> bool {
        self.additional_driver > -1.0
    }

    /// Whether the booking can be cancelled by the driver.
    pub fn allows_cancellation(&self) -> bool {
        self.cancellation > -1.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedCars {
    pub cars: Vec<Car>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedCars {
    pub fn into_dto(self) -> PaginatedCarsDto {
        PaginatedCarsDto {
            cars: self.cars.into_iter().map(Car::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Car fields written on creation and update.
#[derive(Debug, Clone)]
pub struct CarParams {
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
    pub is_date_based_price: bool,
    pub date_based_prices: Vec<DateBasedPrice>,
}

impl CarParams {
    pub fn from_dto(dto: CarPayloadDto) -> Self {
        Self {
            supplier_id: dto.supplier_id,
            name: dto.name.trim().to_string(),
            minimum_age: dto.minimum_age,
            locations: dto.locations,
            daily_price: dto.daily_price,
            discounted_daily_price: dto.discounted_daily_price,
            bi_weekly_price: dto.bi_weekly_price,
            discounted_bi_weekly_price: dto.discounted_bi_weekly_price,
            weekly_price: dto.weekly_price,
            discounted_weekly_price: dto.discounted_weekly_price,
            monthly_price: dto.monthly_price,
            discounted_monthly_price: dto.discounted_monthly_price,
            deposit: dto.deposit,
            available: dto.available,
            fully_booked: dto.fully_booked,
            coming_soon: dto.coming_soon,
            car_type: dto.car_type,
            gearbox: dto.gearbox,
            aircon: dto.aircon,
            image: dto.image,
            seats: dto.seats,
            doors: dto.doors,
            fuel_policy: dto.fuel_policy,
            mileage: dto.mileage,
            cancellation: dto.cancellation,
            amendments: dto.amendments,
            theft_protection: dto.theft_protection,
            collision_damage_waiver: dto.collision_damage_waiver,
            full_insurance: dto.full_insurance,
            additional_driver: dto.additional_driver,
            range: dto.range,
            multimedia: dto.multimedia,
            rating: dto.rating,
            co2: dto.co2,
            is_date_based_price: dto.is_date_based_price,
            date_based_prices: dto
                .date_based_prices
                .into_iter()
                .map(DateBasedPrice::from_dto)
                .collect(),
        }
    }
}

/// Car filter; empty lists and `None` do not restrict the results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarFilter {
    pub suppliers: Vec<i32>,
    pub keyword: Option<String>,
    pub car_types: Vec<CarType>,
    pub gearboxes: Vec<Gearbox>,
    pub mileage: Option<Mileage>,
    pub fuel_policies: Vec<FuelPolicy>,
    pub deposit_max: Option<f64>,
    pub available: Option<bool>,
    pub ranges: Vec<CarRange>,
    pub multimedia: Vec<Multimedia>,
    pub rating_min: Option<f64>,
    pub seats_min: Option<i32>,
}

impl CarFilter {
    pub fn from_dto(dto: CarFilterDto) -> Self {
        Self {
            suppliers: dto.suppliers,
            keyword: dto
                .keyword
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            car_types: dto.car_types,
            gearboxes: dto.gearboxes,
            mileage: dto.mileage,
            fuel_policies: dto.fuel_policies,
            deposit_max: dto.deposit,
            available: dto.available,
            ranges: dto.ranges,
            multimedia: dto.multimedia,
            rating_min: dto.rating,
            seats_min: dto.seats,
        }
    }
}

/// Constraints that only apply to the storefront search.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityWindow {
    pub pickup_location_id: i32,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    /// Rental length; suppliers requiring more days than this are excluded.
    pub days: i64,
}
