//! SeaORM entities for the rental marketplace schema.
//!
//! Enumerated values (user type, booking status, car type, ...) are stored as
//! lower snake_case strings and parsed at the repository boundary.

pub mod prelude;

pub mod additional_driver;
pub mod booking;
pub mod car;
pub mod car_location;
pub mod country;
pub mod date_based_price;
pub mod location;
pub mod notification;
pub mod notification_counter;
pub mod parking_spot;
pub mod push_token;
pub mod token;
pub mod user;
