use crate::{
    model::enums::UserType,
    server::{
        data::user::UserRepository,
        error::AppError,
        model::user::{CreateUserParams, UpdateUserParams, UserSearchParams},
    },
};
use chrono::{Duration, Utc};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{self, booking::BookingFactory, user::UserFactory},
};

mod admin_exists;
mod create;
mod delete_many;
mod find_expired_unverified_ids;
mod search;
mod update;
