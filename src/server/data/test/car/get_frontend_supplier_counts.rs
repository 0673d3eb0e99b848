use super::*;

/// Tests counting the storefront cars of each supplier at a pickup location.
///
/// Verifies that unavailable cars and cars of other locations are not counted.
///
/// Expected: Ok with the suppliers owning matching cars, ordered by id
#[tokio::test]
async fn counts_available_cars_per_supplier() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let country = factory::country::create_country(db).await?;
    let pickup = factory::location::create_location(db, country.id).await?;
    let elsewhere = factory::location::create_location(db, country.id).await?;

    let busy = factory::user::create_supplier(db).await?;
    let unavailable = factory::user::create_supplier(db).await?;
    let remote = factory::user::create_supplier(db).await?;
    let small = factory::user::create_supplier(db).await?;

    CarFactory::new(db, busy.id)
        .locations(vec![pickup.id])
        .build()
        .await?;
    CarFactory::new(db, busy.id)
        .locations(vec![pickup.id, elsewhere.id])
        .gearbox("automatic")
        .build()
        .await?;
    CarFactory::new(db, unavailable.id)
        .locations(vec![pickup.id])
        .available(false)
        .build()
        .await?;
    CarFactory::new(db, remote.id)
        .locations(vec![elsewhere.id])
        .build()
        .await?;
    CarFactory::new(db, small.id)
        .locations(vec![pickup.id])
        .build()
        .await?;

    let counts = CarRepository::new(db)
        .get_frontend_supplier_counts(&CarFilter::default(), pickup.id)
        .await?;

    assert_eq!(counts, vec![(busy.id, 2), (small.id, 1)]);

    Ok(())
}

/// Tests that the car filter narrows the counted cars.
///
/// Expected: Ok with only the supplier owning an automatic car, counted once
#[tokio::test]
async fn applies_car_filter() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let country = factory::country::create_country(db).await?;
    let pickup = factory::location::create_location(db, country.id).await?;
    let manual_only = factory::user::create_supplier(db).await?;
    let mixed = factory::user::create_supplier(db).await?;

    CarFactory::new(db, manual_only.id)
        .locations(vec![pickup.id])
        .build()
        .await?;
    CarFactory::new(db, mixed.id)
        .locations(vec![pickup.id])
        .build()
        .await?;
    CarFactory::new(db, mixed.id)
        .locations(vec![pickup.id])
        .gearbox("automatic")
        .build()
        .await?;

    let filter = CarFilter {
        gearboxes: vec![Gearbox::Automatic],
        ..CarFilter::default()
    };
    let counts = CarRepository::new(db)
        .get_frontend_supplier_counts(&filter, pickup.id)
        .await?;

    assert_eq!(counts, vec![(mixed.id, 1)]);

    Ok(())
}

/// Tests a location no car serves.
///
/// Expected: Ok with no suppliers
#[tokio::test]
async fn empty_for_unserved_location() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let country = factory::country::create_country(db).await?;
    let location = factory::location::create_location(db, country.id).await?;

    let counts = CarRepository::new(db)
        .get_frontend_supplier_counts(&CarFilter::default(), location.id)
        .await?;

    assert!(counts.is_empty());

    Ok(())
}
