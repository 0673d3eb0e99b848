use crate::server::{data::country::CountryRepository, model::country::CreateCountryParams};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;
mod get_with_locations;
mod in_use;
