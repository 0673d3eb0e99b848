//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.
//! Enumerated columns are parsed into their typed form on the way in, so services never
//! compare raw strings.

pub mod booking;
pub mod car;
pub mod country;
pub mod location;
pub mod notification;
pub mod supplier;
pub mod user;

/// Number of pages needed to show `total` items, `per_page` at a time.
pub fn page_count(total: u64, per_page: u64) -> u64 {
    if per_page > 0 {
        total.div_ceil(per_page)
    } else {
        0
    }
}
