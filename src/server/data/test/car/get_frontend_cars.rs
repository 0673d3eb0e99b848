use super::*;

/// Tests that cars with an active booking overlapping the window are hidden.
///
/// Verifies that cancelled bookings and bookings outside the window do not hide a car.
///
/// Expected: Ok with the free cars only
#[tokio::test]
async fn excludes_cars_booked_during_window() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let free = CarFactory::new(db, deps.supplier.id)
        .locations(vec![deps.location.id])
        .build()
        .await?;
    let cancelled = CarFactory::new(db, deps.supplier.id)
        .locations(vec![deps.location.id])
        .build()
        .await?;

    let from = Utc::now() + Duration::days(10);
    let to = from + Duration::days(3);

    BookingFactory::from_dependencies(db, &deps)
        .dates(from + Duration::days(1), to + Duration::days(1))
        .status(BookingStatus::Paid.as_str())
        .build()
        .await?;
    BookingFactory::new(
        db,
        deps.supplier.id,
        cancelled.id,
        deps.driver.id,
        deps.location.id,
    )
    .dates(from, to)
    .status(BookingStatus::Cancelled.as_str())
    .build()
    .await?;
    BookingFactory::new(db, deps.supplier.id, free.id, deps.driver.id, deps.location.id)
        .dates(to + Duration::days(1), to + Duration::days(4))
        .status(BookingStatus::Reserved.as_str())
        .build()
        .await?;

    let window = AvailabilityWindow {
        pickup_location_id: deps.location.id,
        from,
        to,
        days: 3,
    };
    let (cars, total) = CarRepository::new(db)
        .get_frontend_cars(&CarFilter::default(), &window, 0, 10)
        .await?;

    assert_eq!(total, 2);
    assert!(cars.iter().all(|c| c.id != deps.car.id));

    Ok(())
}

/// Tests that suppliers requiring longer rentals are left out.
///
/// Expected: Ok with only the car of the flexible supplier
#[tokio::test]
async fn excludes_suppliers_with_longer_minimum_rental() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let country = factory::country::create_country(db).await?;
    let location = factory::location::create_location(db, country.id).await?;
    let strict = UserFactory::new(db)
        .user_type("supplier")
        .minimum_rental_days(Some(7))
        .build()
        .await?;
    let flexible = UserFactory::new(db)
        .user_type("supplier")
        .minimum_rental_days(Some(2))
        .build()
        .await?;
    CarFactory::new(db, strict.id)
        .locations(vec![location.id])
        .build()
        .await?;
    let expected = CarFactory::new(db, flexible.id)
        .locations(vec![location.id])
        .build()
        .await?;

    let from = Utc::now() + Duration::days(2);
    let window = AvailabilityWindow {
        pickup_location_id: location.id,
        from,
        to: from + Duration::days(3),
        days: 3,
    };
    let (cars, total) = CarRepository::new(db)
        .get_frontend_cars(&CarFilter::default(), &window, 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(cars[0].id, expected.id);

    Ok(())
}

/// Tests that unavailable cars and cars of other locations are left out.
///
/// Expected: Ok with no cars
#[tokio::test]
async fn excludes_unavailable_and_unserved_cars() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let supplier = factory::user::create_supplier(db).await?;
    let country = factory::country::create_country(db).await?;
    let pickup = factory::location::create_location(db, country.id).await?;
    let elsewhere = factory::location::create_location(db, country.id).await?;
    CarFactory::new(db, supplier.id)
        .locations(vec![pickup.id])
        .available(false)
        .build()
        .await?;
    CarFactory::new(db, supplier.id)
        .locations(vec![elsewhere.id])
        .build()
        .await?;

    let from = Utc::now() + Duration::days(2);
    let window = AvailabilityWindow {
        pickup_location_id: pickup.id,
        from,
        to: from + Duration::days(1),
        days: 1,
    };
    let (cars, total) = CarRepository::new(db)
        .get_frontend_cars(&CarFilter::default(), &window, 0, 10)
        .await?;

    assert_eq!(total, 0);
    assert!(cars.is_empty());

    Ok(())
}
