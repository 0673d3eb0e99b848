use super::*;

/// Tests confirming the checkout of a void booking.
///
/// Verifies that the status and payment fields are stored and the expiry is cleared.
///
/// Expected: Ok(Some) with a paid booking
#[tokio::test]
async fn confirms_void_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    BookingFactory::from_dependencies(db, &deps)
        .status("void")
        .session_id(Some("sess_1".to_string()))
        .expire_at(Some(Utc::now() + Duration::minutes(30)))
        .build()
        .await?;

    let repo = BookingRepository::new(db);
    let pending = repo.find_by_session_id("sess_1").await?.unwrap();
    assert_eq!(pending.status, BookingStatus::Void);

    let confirmed = repo
        .confirm_payment(
            pending.id,
            ConfirmPaymentParams {
                status: BookingStatus::Paid,
                payment_intent_id: Some("pi_1".to_string()),
                customer_id: Some("cus_1".to_string()),
                is_deposit: false,
                is_payed_in_full: true,
            },
        )
        .await?
        .unwrap();

    assert_eq!(confirmed.status, BookingStatus::Paid);
    assert_eq!(confirmed.payment_intent_id.as_deref(), Some("pi_1"));
    assert!(confirmed.is_payed_in_full);
    assert!(confirmed.expire_at.is_none());

    Ok(())
}

/// Tests looking up an unknown checkout session.
///
/// Expected: Ok(None)
#[tokio::test]
async fn unknown_session_returns_none() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = BookingRepository::new(db).find_by_session_id("missing").await?;

    assert!(result.is_none());

    Ok(())
}
