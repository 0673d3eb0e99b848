//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//! All database queries, inserts, updates, and deletes are performed through these repositories.

pub mod booking;
pub mod car;
pub mod country;
pub mod location;
pub mod notification;
pub mod push_token;
pub mod token;
pub mod user;

#[cfg(test)]
mod test;
