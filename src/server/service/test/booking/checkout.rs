use super::*;

/// Tests a signed-in checkout paid online.
///
/// Expected: void booking with session and expiry, full price due, nobody notified yet
#[tokio::test]
async fn creates_void_booking_awaiting_payment() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let driver = user(db, deps.driver.id).await;

    let result = BookingService::new(db, &fx.config, &fx.mailer, &fx.push)
        .checkout(Some(&driver), checkout_params(&deps))
        .await?;

    assert_eq!(result.booking.status, BookingStatus::Void);
    assert_eq!(result.booking.driver_id, driver.id);
    assert_eq!(result.booking.supplier_id, deps.supplier.id);
    assert_eq!(result.booking.session_id.as_ref().map(String::len), Some(32));
    assert!(result.booking.expire_at.is_some());
    assert_eq!(result.booking.price, 150.0);
    assert_eq!(result.amount_due, 150.0);
    assert_eq!(counter(db, deps.supplier.id).await, 0);

    Ok(())
}

/// Tests that paying the deposit only charges the car deposit now.
///
/// Expected: amount due equals the deposit
#[tokio::test]
async fn deposit_checkout_charges_deposit() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let driver = user(db, deps.driver.id).await;

    let mut params = checkout_params(&deps);
    params.pay_deposit = true;
    let result = BookingService::new(db, &fx.config, &fx.mailer, &fx.push)
        .checkout(Some(&driver), params)
        .await?;

    assert!(result.booking.is_deposit);
    assert_eq!(result.amount_due, 500.0);

    Ok(())
}

/// Tests paying at pickup, which needs a supplier accepting it.
///
/// Expected: BadRequest for a supplier without pay later, pending booking otherwise
/// with supplier and admin notified
#[tokio::test]
async fn pay_later_creates_pending_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = BookingService::new(db, &fx.config, &fx.mailer, &fx.push);

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let admin = factory::user::create_admin(db).await?;
    let driver = user(db, deps.driver.id).await;

    let mut params = checkout_params(&deps);
    params.pay_later = true;
    let refused = service.checkout(Some(&driver), params.clone()).await;
    assert!(matches!(refused, Err(AppError::BadRequest(_))));

    let supplier = UserFactory::new(db)
        .user_type("supplier")
        .pay_later(true)
        .build()
        .await?;
    let car = CarFactory::new(db, supplier.id)
        .locations(vec![deps.location.id])
        .build()
        .await?;
    params.car_id = car.id;

    let result = service.checkout(Some(&driver), params).await?;

    assert_eq!(result.booking.status, BookingStatus::Pending);
    assert!(result.booking.session_id.is_none());
    assert!(result.booking.expire_at.is_none());
    assert_eq!(result.amount_due, 0.0);
    assert_eq!(counter(db, supplier.id).await, 1);
    assert_eq!(counter(db, admin.id).await, 1);

    Ok(())
}

/// Tests a checkout without account.
///
/// Expected: an unverified, expiring customer with an activation link in the outbox
#[tokio::test]
async fn guest_checkout_creates_customer() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();

    let deps = factory::helpers::create_booking_dependencies(db).await?;

    let mut params = checkout_params(&deps);
    params.driver = Some(guest("Guest@Example.com"));
    let result = BookingService::new(db, &fx.config, &fx.mailer, &fx.push)
        .checkout(None, params)
        .await?;

    let customer = user(db, result.booking.driver_id).await;
    assert_eq!(customer.email, "guest@example.com");
    assert_eq!(customer.user_type, UserType::User);
    assert!(!customer.verified);
    assert!(customer.password.is_none());
    assert!(customer.expire_at.is_some());

    let outbox = fx.mailer.outbox().await;
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].to, "guest@example.com");
    assert!(outbox[0].html.contains("http://frontend.test/"));

    Ok(())
}

/// Tests a guest checkout whose additional driver is invalid.
///
/// Expected: BadRequest with no account created and no mail sent, then the corrected
/// checkout succeeds with the same email
#[tokio::test]
async fn invalid_additional_driver_leaves_no_guest() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = BookingService::new(db, &fx.config, &fx.mailer, &fx.push);

    let deps = factory::helpers::create_booking_dependencies(db).await?;

    let mut params = checkout_params(&deps);
    params.driver = Some(guest("guest@example.com"));
    params.options.additional_driver = true;
    params.additional_driver = Some(additional_driver("not-an-email"));

    let refused = service.checkout(None, params.clone()).await;

    assert!(matches!(refused, Err(AppError::BadRequest(_))));
    assert!(UserRepository::new(db)
        .find_by_email("guest@example.com")
        .await?
        .is_none());
    assert!(fx.mailer.outbox().await.is_empty());

    params.additional_driver = Some(additional_driver("second@example.com"));
    let result = service.checkout(None, params).await?;

    let driver_id = result.booking.additional_driver_id.unwrap();
    let stored = BookingRepository::new(db)
        .get_additional_driver(driver_id)
        .await?
        .unwrap();
    assert_eq!(stored.email, "second@example.com");
    assert_eq!(user(db, result.booking.driver_id).await.email, "guest@example.com");

    Ok(())
}

/// Tests the checks on guests: driver details required, email not registered.
///
/// Expected: BadRequest without driver, Conflict for a registered email
#[tokio::test]
async fn guest_checkout_requires_new_driver() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = BookingService::new(db, &fx.config, &fx.mailer, &fx.push);

    let deps = factory::helpers::create_booking_dependencies(db).await?;

    let missing = service.checkout(None, checkout_params(&deps)).await;
    assert!(matches!(missing, Err(AppError::BadRequest(_))));

    let mut params = checkout_params(&deps);
    params.driver = Some(guest(&deps.driver.email));
    let taken = service.checkout(None, params).await;
    assert!(matches!(taken, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests that the driver must be old enough for the car.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_underage_driver() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let young = UserFactory::new(db)
        .birth_date(Some((Utc::now() - Duration::days(19 * 365)).date_naive()))
        .build()
        .await?;
    let young = user(db, young.id).await;

    let result = BookingService::new(db, &fx.config, &fx.mailer, &fx.push)
        .checkout(Some(&young), checkout_params(&deps))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that a car booked for overlapping dates cannot be checked out.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn rejects_overlapping_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let params = checkout_params(&deps);
    BookingFactory::from_dependencies(db, &deps)
        .dates(params.from + Duration::days(1), params.to + Duration::days(1))
        .status("paid")
        .build()
        .await?;

    let driver = user(db, deps.driver.id).await;
    let result = BookingService::new(db, &fx.config, &fx.mailer, &fx.push)
        .checkout(Some(&driver), params)
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests the car and supplier constraints: served pickup location, availability and
/// minimum rental length.
///
/// Expected: Err(AppError::BadRequest) for each
#[tokio::test]
async fn rejects_unbookable_cars() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = BookingService::new(db, &fx.config, &fx.mailer, &fx.push);

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let driver = user(db, deps.driver.id).await;

    let elsewhere = factory::location::create_location(db, deps.country.id).await?;
    let mut params = checkout_params(&deps);
    params.pickup_location_id = elsewhere.id;
    let result = service.checkout(Some(&driver), params).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let soon = CarFactory::new(db, deps.supplier.id)
        .locations(vec![deps.location.id])
        .coming_soon(true)
        .build()
        .await?;
    let mut params = checkout_params(&deps);
    params.car_id = soon.id;
    let result = service.checkout(Some(&driver), params).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let strict = UserFactory::new(db)
        .user_type("supplier")
        .minimum_rental_days(Some(5))
        .build()
        .await?;
    let strict_car = CarFactory::new(db, strict.id)
        .locations(vec![deps.location.id])
        .build()
        .await?;
    let mut params = checkout_params(&deps);
    params.car_id = strict_car.id;
    let result = service.checkout(Some(&driver), params).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
