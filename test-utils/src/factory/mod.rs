//! Row factories for tests.
//!
//! Each factory inserts one entity with defaults that satisfy every constraint of
//! the schema. Override only what the test is about.

pub mod booking;
pub mod car;
pub mod country;
pub mod helpers;
pub mod location;
pub mod user;
