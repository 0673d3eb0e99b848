use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Country};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Country)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed during database setup, in insertion order.
    tables: Vec<TableCreateStatement>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Creates a builder with no tables.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables should be added in dependency order (tables with foreign
    /// keys after the tables they reference).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait`
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the user table together with its token and push token tables.
    pub fn with_user_tables(self) -> Self {
        self.with_table(User)
            .with_table(Token)
            .with_table(PushToken)
    }

    /// Adds user, country, location and parking spot tables.
    pub fn with_location_tables(self) -> Self {
        self.with_user_tables()
            .with_table(Country)
            .with_table(Location)
            .with_table(ParkingSpot)
    }

    /// Adds everything needed to store cars with their locations and date based prices.
    pub fn with_car_tables(self) -> Self {
        self.with_location_tables()
            .with_table(Car)
            .with_table(CarLocation)
            .with_table(DateBasedPrice)
    }

    /// Adds every table of the schema.
    ///
    /// Use this when testing booking functionality, which touches cars, users,
    /// locations, additional drivers and notifications.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_booking_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_booking_tables(self) -> Self {
        self.with_car_tables()
            .with_table(AdditionalDriver)
            .with_table(Booking)
            .with_table(Notification)
            .with_table(NotificationCounter)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}
