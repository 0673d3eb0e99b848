use super::*;

/// Tests that a location served by a car is in use.
///
/// Expected: Ok(true)
#[tokio::test]
async fn reports_location_served_by_car() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deps = factory::helpers::create_booking_dependencies(db).await?;

    assert!(LocationRepository::new(db).in_use(deps.location.id).await?);

    Ok(())
}

/// Tests that a drop-off location of a booking is in use even without cars.
///
/// Expected: Ok(true) for the drop-off, Ok(false) for an unused location
#[tokio::test]
async fn reports_booking_drop_off_location() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let drop_off = LocationFactory::new(db, deps.country.id).build().await?;
    let unused = LocationFactory::new(db, deps.country.id).build().await?;

    let booking = BookingFactory::from_dependencies(db, &deps).build().await?;
    let mut active: entity::booking::ActiveModel = booking.into();
    active.drop_off_location_id = sea_orm::ActiveValue::Set(drop_off.id);
    sea_orm::ActiveModelTrait::update(active, db).await?;

    let repo = LocationRepository::new(db);

    assert!(repo.in_use(drop_off.id).await?);
    assert!(!repo.in_use(unused.id).await?);

    Ok(())
}
