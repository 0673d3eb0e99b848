use super::*;

/// Tests filtering bookings by status and supplier.
///
/// Expected: Ok with the reserved booking of the supplier
#[tokio::test]
async fn filters_by_status_and_supplier() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let other_supplier = factory::user::create_supplier(db).await?;
    let other_car = CarFactory::new(db, other_supplier.id)
        .locations(vec![deps.location.id])
        .build()
        .await?;

    let reserved = BookingFactory::from_dependencies(db, &deps)
        .status("reserved")
        .build()
        .await?;
    BookingFactory::from_dependencies(db, &deps)
        .status("cancelled")
        .build()
        .await?;
    BookingFactory::new(
        db,
        other_supplier.id,
        other_car.id,
        deps.driver.id,
        deps.location.id,
    )
    .status("reserved")
    .build()
    .await?;

    let (items, total) = BookingRepository::new(db)
        .search(&BookingSearchParams {
            suppliers: vec![deps.supplier.id],
            statuses: vec![BookingStatus::Reserved],
            page: 0,
            per_page: 10,
            ..Default::default()
        })
        .await?;

    assert_eq!(total, 1);
    assert_eq!(items[0].id, reserved.id);
    assert_eq!(items[0].car_name, deps.car.name);
    assert_eq!(items[0].supplier_name, deps.supplier.full_name);

    Ok(())
}

/// Tests the keyword matching driver names and booking ids.
///
/// Expected: Ok with the booking of the named driver, then the booking with that id
#[tokio::test]
async fn matches_keyword_on_driver_name_and_id() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let named = UserFactory::new(db).full_name("Zoe Quill").build().await?;

    let first = BookingFactory::from_dependencies(db, &deps)
        .driver(named.id)
        .build()
        .await?;
    let second = BookingFactory::from_dependencies(db, &deps).build().await?;

    let repo = BookingRepository::new(db);

    let (items, total) = repo
        .search(&BookingSearchParams {
            keyword: Some("quill".to_string()),
            page: 0,
            per_page: 10,
            ..Default::default()
        })
        .await?;
    assert_eq!(total, 1);
    assert_eq!(items[0].id, first.id);

    let (items, _) = repo
        .search(&BookingSearchParams {
            keyword: Some(second.id.to_string()),
            page: 0,
            per_page: 10,
            ..Default::default()
        })
        .await?;
    assert!(items.iter().any(|i| i.id == second.id));

    Ok(())
}

/// Tests that results come newest first, whatever their pickup dates.
///
/// Expected: Ok with the most recently created booking first
#[tokio::test]
async fn orders_by_creation_date() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let now = Utc::now();

    let older = BookingFactory::from_dependencies(db, &deps)
        .dates(now + Duration::days(20), now + Duration::days(22))
        .created_at(now - Duration::days(2))
        .build()
        .await?;
    let newer = BookingFactory::from_dependencies(db, &deps)
        .dates(now + Duration::days(1), now + Duration::days(2))
        .created_at(now)
        .build()
        .await?;

    let (items, total) = BookingRepository::new(db)
        .search(&BookingSearchParams {
            page: 0,
            per_page: 10,
            ..Default::default()
        })
        .await?;

    assert_eq!(total, 2);
    assert_eq!(items[0].id, newer.id);
    assert_eq!(items[1].id, older.id);

    Ok(())
}
