use super::*;

/// Tests overlap detection against active bookings.
///
/// Expected: true while overlapping, false for touching ranges and when excluded
#[tokio::test]
async fn detects_overlapping_active_booking() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let from = Utc::now() + Duration::days(5);
    let to = from + Duration::days(3);
    let booking = BookingFactory::from_dependencies(db, &deps)
        .dates(from, to)
        .status("paid")
        .build()
        .await?;

    let repo = BookingRepository::new(db);

    assert!(
        repo.car_is_booked(deps.car.id, from + Duration::days(1), to + Duration::days(1), None)
            .await?
    );
    assert!(
        !repo
            .car_is_booked(deps.car.id, to, to + Duration::days(2), None)
            .await?
    );
    assert!(
        !repo
            .car_is_booked(deps.car.id, from, to, Some(booking.id))
            .await?
    );

    Ok(())
}

/// Tests that void and cancelled bookings do not block the car.
///
/// Expected: Ok(false)
#[tokio::test]
async fn ignores_inactive_statuses() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let from = Utc::now() + Duration::days(5);
    let to = from + Duration::days(3);
    for status in ["void", "cancelled"] {
        BookingFactory::from_dependencies(db, &deps)
            .dates(from, to)
            .status(status)
            .build()
            .await?;
    }

    let booked = BookingRepository::new(db)
        .car_is_booked(deps.car.id, from, to, None)
        .await?;

    assert!(!booked);

    Ok(())
}
