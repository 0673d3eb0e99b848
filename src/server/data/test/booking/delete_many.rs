use super::*;

/// Tests that deleting bookings also deletes their additional drivers.
///
/// Expected: Ok(1) and no additional driver left
#[tokio::test]
async fn deletes_additional_drivers() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let additional = factory::booking::create_additional_driver(db).await?;
    let booking = BookingFactory::from_dependencies(db, &deps)
        .additional_driver_id(Some(additional.id))
        .build()
        .await?;

    let deleted = BookingRepository::new(db)
        .delete_many(vec![booking.id])
        .await?;

    assert_eq!(deleted, 1);
    let drivers = entity::prelude::AdditionalDriver::find().all(db).await?;
    assert!(drivers.is_empty());

    Ok(())
}

/// Tests collecting additional drivers of a user's bookings before the user goes.
///
/// Expected: Ok with the additional driver id for both the driver and the supplier
#[tokio::test]
async fn collects_additional_drivers_of_users() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let additional = factory::booking::create_additional_driver(db).await?;
    BookingFactory::from_dependencies(db, &deps)
        .additional_driver_id(Some(additional.id))
        .build()
        .await?;
    BookingFactory::from_dependencies(db, &deps).build().await?;

    let repo = BookingRepository::new(db);

    assert_eq!(
        repo.additional_driver_ids_of_users(vec![deps.driver.id])
            .await?,
        vec![additional.id]
    );
    assert_eq!(
        repo.additional_driver_ids_of_users(vec![deps.supplier.id])
            .await?,
        vec![additional.id]
    );

    Ok(())
}
