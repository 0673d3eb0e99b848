//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating multiple repository calls and external services
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Handling complex multi-step operations

pub mod auth;
pub mod booking;
pub mod car;
pub mod contract;
pub mod country;
pub mod location;
pub mod mail;
pub mod notification;
pub mod pricing;
pub mod push;
pub mod storage;
pub mod supplier;
pub mod user;

#[cfg(test)]
mod test;
