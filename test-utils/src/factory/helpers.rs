//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique names and emails in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Rows needed before a booking can be inserted.
pub struct BookingDependencies {
    pub supplier: entity::user::Model,
    pub driver: entity::user::Model,
    pub country: entity::country::Model,
    pub location: entity::location::Model,
    pub car: entity::car::Model,
}

/// Creates a supplier, a driver, a country with one location and a car served at that location.
///
/// All entities are created with default values. Use the individual factories if a test
/// needs to customize one of them.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(BookingDependencies)` - All created rows
/// - `Err(DbErr)` - Database error during creation
pub async fn create_booking_dependencies(
    db: &DatabaseConnection,
) -> Result<BookingDependencies, DbErr> {
    let supplier = crate::factory::user::create_supplier(db).await?;
    let driver = crate::factory::user::create_user(db).await?;
    let country = crate::factory::country::create_country(db).await?;
    let location = crate::factory::location::create_location(db, country.id).await?;
    let car = crate::factory::car::CarFactory::new(db, supplier.id)
        .locations(vec![location.id])
        .build()
        .await?;

    Ok(BookingDependencies {
        supplier,
        driver,
        country,
        location,
        car,
    })
}
