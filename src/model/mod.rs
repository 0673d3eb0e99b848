//! Request and response types shared with the admin and customer applications.
//!
//! Everything in this module is plain serde data. Enumerations are serialized in
//! `snake_case`, which is also how they are stored in the database.

pub mod api;
pub mod booking;
pub mod car;
pub mod country;
pub mod enums;
pub mod location;
pub mod notification;
pub mod supplier;
pub mod user;
