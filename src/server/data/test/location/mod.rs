use crate::server::{
    data::location::LocationRepository,
    model::location::{CreateLocationParams, ParkingSpotParams, UpdateLocationParams},
};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{self, booking::BookingFactory, location::LocationFactory},
};

mod create;
mod get_with_position;
mod in_use;
mod update;

fn spot(name: &str) -> ParkingSpotParams {
    ParkingSpotParams {
        name: name.to_string(),
        latitude: 33.59,
        longitude: -7.61,
    }
}
