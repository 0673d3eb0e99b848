use crate::{
    model::enums::BookingStatus,
    server::{
        data::booking::BookingRepository,
        error::AppError,
        model::booking::{
            AdditionalDriverParams, BookingOptions, BookingSearchParams, ConfirmPaymentParams,
            CreateBookingParams,
        },
    },
};
use chrono::{Duration, NaiveDate, Utc};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{self, booking::BookingFactory, car::CarFactory, user::UserFactory},
};

mod car_is_booked;
mod confirm_payment;
mod create;
mod delete_expired_void;
mod delete_many;
mod search;
