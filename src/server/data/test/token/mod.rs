use crate::server::data::token::TokenRepository;
use chrono::{Duration, Utc};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod delete_expired;
mod is_valid;
