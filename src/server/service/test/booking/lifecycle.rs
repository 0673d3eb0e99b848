use super::*;

/// Tests confirming the payment of a checkout session.
///
/// Expected: paid booking without expiry, driver notified, second confirmation refused
#[tokio::test]
async fn confirm_marks_booking_paid() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = BookingService::new(db, &fx.config, &fx.mailer, &fx.push);

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let driver = user(db, deps.driver.id).await;

    let checkout = service.checkout(Some(&driver), checkout_params(&deps)).await?;
    let session_id = checkout.booking.session_id.unwrap();

    assert_eq!(
        service.id_by_session(&session_id).await?,
        Some(checkout.booking.id)
    );

    let booking = service
        .confirm(&session_id, Some("pi_1".to_string()), Some("cus_1".to_string()))
        .await?;

    assert_eq!(booking.status, BookingStatus::Paid);
    assert!(booking.is_payed_in_full);
    assert!(booking.expire_at.is_none());
    assert_eq!(booking.payment_intent_id.as_deref(), Some("pi_1"));
    assert_eq!(counter(db, driver.id).await, 1);
    assert_eq!(counter(db, deps.supplier.id).await, 1);

    let again = service.confirm(&session_id, None, None).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests that a confirmed guest checkout keeps its account from expiring.
///
/// Expected: deposit status and no expiry on the guest account
#[tokio::test]
async fn confirm_deposit_keeps_guest_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = BookingService::new(db, &fx.config, &fx.mailer, &fx.push);

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let mut params = checkout_params(&deps);
    params.driver = Some(guest("guest@example.com"));
    params.pay_deposit = true;

    let checkout = service.checkout(None, params).await?;
    let booking = service
        .confirm(checkout.booking.session_id.as_deref().unwrap(), None, None)
        .await?;

    assert_eq!(booking.status, BookingStatus::Deposit);
    assert!(!booking.is_payed_in_full);
    assert!(user(db, booking.driver_id).await.expire_at.is_none());

    Ok(())
}

/// Tests abandoning a checkout.
///
/// Expected: false for a wrong session, then the booking and the guest account are gone
#[tokio::test]
async fn delete_temp_removes_checkout_and_guest() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = BookingService::new(db, &fx.config, &fx.mailer, &fx.push);

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let mut params = checkout_params(&deps);
    params.driver = Some(guest("guest@example.com"));
    let checkout = service.checkout(None, params).await?;
    let booking = checkout.booking;

    assert!(!service.delete_temp(booking.id, "wrong-session").await?);

    assert!(
        service
            .delete_temp(booking.id, booking.session_id.as_deref().unwrap())
            .await?
    );
    assert!(BookingRepository::new(db).get_by_id(booking.id).await?.is_none());
    assert!(UserRepository::new(db)
        .find_by_id(booking.driver_id)
        .await?
        .is_none());

    Ok(())
}

/// Tests that a back-office booking without price gets the computed one.
///
/// Expected: Ok with three days at the daily price
#[tokio::test]
async fn create_computes_missing_price() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let supplier = user(db, deps.supplier.id).await;
    let from = Utc::now() + Duration::days(2);

    let booking = BookingService::new(db, &fx.config, &fx.mailer, &fx.push)
        .create(
            &supplier,
            BookingPayload {
                car_id: deps.car.id,
                driver_id: deps.driver.id,
                pickup_location_id: deps.location.id,
                drop_off_location_id: deps.location.id,
                from,
                to: from + Duration::days(3),
                status: BookingStatus::Reserved,
                options: BookingOptions::default(),
                additional_driver: None,
                price: None,
            },
        )
        .await?;

    assert_eq!(booking.price, 150.0);
    assert_eq!(booking.status, BookingStatus::Reserved);

    Ok(())
}

/// Tests the bulk status update of a supplier.
///
/// Expected: only the supplier's bookings whose status changed are updated and their
/// drivers notified
#[tokio::test]
async fn update_status_notifies_drivers_of_changes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let other = factory::helpers::create_booking_dependencies(db).await?;

    let pending = BookingFactory::from_dependencies(db, &deps).build().await?;
    let reserved = BookingFactory::from_dependencies(db, &deps)
        .status("reserved")
        .build()
        .await?;
    let foreign = BookingFactory::from_dependencies(db, &other).build().await?;

    let supplier = user(db, deps.supplier.id).await;
    let updated = BookingService::new(db, &fx.config, &fx.mailer, &fx.push)
        .update_status(
            &supplier,
            vec![pending.id, reserved.id, foreign.id],
            BookingStatus::Reserved,
        )
        .await?;

    assert_eq!(updated, 1);
    assert_eq!(counter(db, deps.driver.id).await, 1);
    assert_eq!(counter(db, other.driver.id).await, 0);

    let repo = BookingRepository::new(db);
    assert_eq!(
        repo.get_by_id(pending.id).await?.unwrap().status,
        BookingStatus::Reserved
    );
    assert_eq!(
        repo.get_by_id(foreign.id).await?.unwrap().status,
        BookingStatus::Pending
    );

    let outbox = fx.mailer.outbox().await;
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].to, deps.driver.email);

    Ok(())
}

/// Tests a cancellation request by the driver.
///
/// Expected: AccessDenied for someone else, then the flag is set and the supplier notified
#[tokio::test]
async fn cancel_request_by_driver() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = BookingService::new(db, &fx.config, &fx.mailer, &fx.push);

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let booking = BookingFactory::from_dependencies(db, &deps)
        .cancellation(true)
        .build()
        .await?;

    let stranger = user(db, factory::user::create_user(db).await?.id).await;
    let denied = service.cancel_request(&stranger, booking.id).await;
    assert!(matches!(
        denied,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let driver = user(db, deps.driver.id).await;
    assert!(service.cancel_request(&driver, booking.id).await?);

    let stored = BookingRepository::new(db).get_by_id(booking.id).await?.unwrap();
    assert!(stored.cancel_request);
    assert_eq!(counter(db, deps.supplier.id).await, 1);

    Ok(())
}

/// Tests who may read a booking.
///
/// Expected: Ok for the driver and the owning supplier, AccessDenied for another supplier
#[tokio::test]
async fn get_is_limited_to_parties() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = BookingService::new(db, &fx.config, &fx.mailer, &fx.push);

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let booking = BookingFactory::from_dependencies(db, &deps).build().await?;

    let driver = user(db, deps.driver.id).await;
    let detail = service.get(&driver, booking.id).await?.unwrap();
    assert_eq!(detail.car_name, deps.car.name);

    let supplier = user(db, deps.supplier.id).await;
    assert!(service.get(&supplier, booking.id).await?.is_some());

    let other = user(db, factory::user::create_supplier(db).await?.id).await;
    assert!(matches!(
        service.get(&other, booking.id).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests that abandoning a checkout keeps an account the driver signed up for.
///
/// Expected: the booking is gone, the unverified account with a password is kept
#[tokio::test]
async fn delete_temp_keeps_signed_up_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = BookingService::new(db, &fx.config, &fx.mailer, &fx.push);

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let signed_up = UserFactory::new(db)
        .verified(false)
        .password_hash("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA")
        .expire_at(Some(Utc::now() + Duration::hours(12)))
        .build()
        .await?;
    let driver = user(db, signed_up.id).await;

    let checkout = service.checkout(Some(&driver), checkout_params(&deps)).await?;
    let booking = checkout.booking;

    assert!(
        service
            .delete_temp(booking.id, booking.session_id.as_deref().unwrap())
            .await?
    );
    assert!(BookingRepository::new(db).get_by_id(booking.id).await?.is_none());
    assert!(UserRepository::new(db)
        .find_by_id(signed_up.id)
        .await?
        .is_some());

    Ok(())
}

/// Tests editing a booking from the back-office.
///
/// Expected: the additional driver follows the option (created, updated, removed)
/// and the driver is notified only when the status changes
#[tokio::test]
async fn update_follows_additional_driver_option() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = BookingService::new(db, &fx.config, &fx.mailer, &fx.push);
    let repo = BookingRepository::new(db);

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let existing = BookingFactory::from_dependencies(db, &deps).build().await?;
    let supplier = user(db, deps.supplier.id).await;

    let from = Utc::now() + Duration::days(5);
    let payload = |status: BookingStatus, additional: Option<AdditionalDriverParams>| {
        BookingPayload {
            car_id: deps.car.id,
            driver_id: deps.driver.id,
            pickup_location_id: deps.location.id,
            drop_off_location_id: deps.location.id,
            from,
            to: from + Duration::days(2),
            status,
            options: BookingOptions {
                additional_driver: additional.is_some(),
                ..BookingOptions::default()
            },
            additional_driver: additional,
            price: None,
        }
    };

    let booking = service
        .update(
            &supplier,
            existing.id,
            payload(
                BookingStatus::Reserved,
                Some(additional_driver("second@example.com")),
            ),
        )
        .await?
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Reserved);
    assert_eq!(booking.price, 110.0);
    let added = booking.additional_driver_id.unwrap();
    assert_eq!(counter(db, deps.driver.id).await, 1);

    let booking = service
        .update(
            &supplier,
            existing.id,
            payload(
                BookingStatus::Reserved,
                Some(additional_driver("other@example.com")),
            ),
        )
        .await?
        .unwrap();
    assert_eq!(booking.additional_driver_id, Some(added));
    assert_eq!(
        repo.get_additional_driver(added).await?.unwrap().email,
        "other@example.com"
    );
    assert_eq!(counter(db, deps.driver.id).await, 1);

    let booking = service
        .update(&supplier, existing.id, payload(BookingStatus::Reserved, None))
        .await?
        .unwrap();
    assert!(booking.additional_driver_id.is_none());
    assert!(repo.get_additional_driver(added).await?.is_none());

    assert!(service
        .update(&supplier, existing.id + 100, payload(BookingStatus::Paid, None))
        .await?
        .is_none());

    Ok(())
}

/// Tests that a supplier cannot edit another supplier's booking.
///
/// Expected: AccessDenied and the booking unchanged
#[tokio::test]
async fn update_refuses_foreign_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let booking = BookingFactory::from_dependencies(db, &deps).build().await?;
    let other = user(db, factory::user::create_supplier(db).await?.id).await;

    let from = Utc::now() + Duration::days(5);
    let result = BookingService::new(db, &fx.config, &fx.mailer, &fx.push)
        .update(
            &other,
            booking.id,
            BookingPayload {
                car_id: deps.car.id,
                driver_id: deps.driver.id,
                pickup_location_id: deps.location.id,
                drop_off_location_id: deps.location.id,
                from,
                to: from + Duration::days(1),
                status: BookingStatus::Cancelled,
                options: BookingOptions::default(),
                additional_driver: None,
                price: None,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));
    assert_eq!(
        BookingRepository::new(db)
            .get_by_id(booking.id)
            .await?
            .unwrap()
            .status,
        BookingStatus::Pending
    );

    Ok(())
}

/// Tests quoting a rental with options.
///
/// Expected: three days at 50 plus theft protection per day and the flat
/// cancellation fee; BadRequest for an option the car does not offer, NotFound for
/// an unknown car
#[tokio::test]
async fn quote_prices_period_and_options() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = BookingService::new(db, &fx.config, &fx.mailer, &fx.push);

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let from = Utc::now() + Duration::days(1);
    let to = from + Duration::days(3);

    let options = BookingOptions {
        theft_protection: true,
        cancellation: true,
        ..BookingOptions::default()
    };
    let (days, price) = service.quote(deps.car.id, from, to, options).await?;
    assert_eq!(days, 3);
    assert_eq!(price, 200.0);

    let unoffered = BookingOptions {
        full_insurance: true,
        ..BookingOptions::default()
    };
    assert!(matches!(
        service.quote(deps.car.id, from, to, unoffered).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service
            .quote(deps.car.id + 100, from, to, BookingOptions::default())
            .await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service
            .quote(deps.car.id, to, from, BookingOptions::default())
            .await,
        Err(AppError::BadRequest(_))
    ));

    Ok(())
}

/// Tests resolving a checkout session to its booking.
///
/// Expected: the booking id for a known session, None otherwise
#[tokio::test]
async fn id_by_session_resolves_checkout() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = BookingService::new(db, &fx.config, &fx.mailer, &fx.push);

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let booking = BookingFactory::from_dependencies(db, &deps)
        .status("void")
        .session_id(Some("cs_known".to_string()))
        .build()
        .await?;

    assert_eq!(service.id_by_session("cs_known").await?, Some(booking.id));
    assert_eq!(service.id_by_session("cs_unknown").await?, None);

    Ok(())
}
