use super::*;

/// Tests creating a booking with an additional driver.
///
/// Expected: Ok with the booking, and a detail view resolving every name
#[tokio::test]
async fn creates_booking_with_additional_driver() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let repo = BookingRepository::new(db);

    let additional = repo
        .create_additional_driver(AdditionalDriverParams {
            full_name: "Sam Second".to_string(),
            email: "sam@test.local".to_string(),
            phone: "+100".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1991, 3, 3).unwrap(),
        })
        .await?;

    let from = Utc::now() + Duration::days(1);
    let booking = repo
        .create(CreateBookingParams {
            supplier_id: deps.supplier.id,
            car_id: deps.car.id,
            driver_id: deps.driver.id,
            pickup_location_id: deps.location.id,
            drop_off_location_id: deps.location.id,
            from,
            to: from + Duration::days(2),
            status: BookingStatus::Pending,
            options: BookingOptions {
                additional_driver: true,
                ..Default::default()
            },
            additional_driver_id: Some(additional.id),
            price: 110.0,
            session_id: None,
            expire_at: None,
            is_deposit: false,
            is_payed_in_full: false,
        })
        .await?;

    assert_eq!(booking.status, BookingStatus::Pending);
    assert!(booking.options.additional_driver);
    assert!(!booking.cancel_request);

    let detail = repo.get_detail(booking.id).await?.unwrap();
    assert_eq!(detail.car_name, deps.car.name);
    assert_eq!(detail.driver_name, deps.driver.full_name);
    assert_eq!(detail.supplier_name, deps.supplier.full_name);
    assert_eq!(detail.pickup_location_name, deps.location.name);
    assert_eq!(detail.additional_driver.unwrap().full_name, "Sam Second");

    Ok(())
}

/// Tests getting the detail of an unknown booking.
///
/// Expected: Ok(None)
#[tokio::test]
async fn detail_returns_none_for_unknown_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = BookingRepository::new(db).get_detail(42).await?;

    assert!(result.is_none());

    Ok(())
}
