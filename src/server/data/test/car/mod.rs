use crate::{
    model::enums::{BookingStatus, CarRange, CarType, FuelPolicy, Gearbox, Mileage, Multimedia},
    server::{
        data::car::CarRepository,
        error::AppError,
        model::car::{AvailabilityWindow, CarFilter, CarParams, DateBasedPrice},
    },
};
use chrono::{Duration, NaiveDate, Utc};
use sea_orm::EntityTrait;
use test_utils::{
    builder::TestBuilder,
    factory::{self, booking::BookingFactory, car::CarFactory, user::UserFactory},
};

mod create;
mod get_frontend_cars;
mod get_frontend_supplier_counts;
mod search;
mod update;

/// Car parameters with the defaults used across these tests.
fn params(supplier_id: i32, locations: Vec<i32>) -> CarParams {
    CarParams {
        supplier_id,
        name: "Dacia Logan".to_string(),
        minimum_age: 21,
        locations,
        daily_price: 40.0,
        discounted_daily_price: None,
        bi_weekly_price: None,
        discounted_bi_weekly_price: None,
        weekly_price: Some(250.0),
        discounted_weekly_price: None,
        monthly_price: None,
        discounted_monthly_price: None,
        deposit: 300.0,
        available: true,
        fully_booked: false,
        coming_soon: false,
        car_type: CarType::Diesel,
        gearbox: Gearbox::Manual,
        aircon: true,
        image: None,
        seats: 5,
        doors: 4,
        fuel_policy: FuelPolicy::FullToFull,
        mileage: -1,
        cancellation: 0.0,
        amendments: 0.0,
        theft_protection: 9.0,
        collision_damage_waiver: 12.0,
        full_insurance: 20.0,
        additional_driver: -1.0,
        range: CarRange::Midi,
        multimedia: vec![Multimedia::Bluetooth],
        rating: Some(4.5),
        co2: None,
        is_date_based_price: false,
        date_based_prices: vec![],
    }
}
