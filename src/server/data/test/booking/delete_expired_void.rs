use super::*;

/// Tests purging void bookings whose checkout window passed.
///
/// Verifies that unexpired void bookings and expired non-void bookings are kept.
///
/// Expected: Ok(1)
#[tokio::test]
async fn deletes_only_expired_void_bookings() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let now = Utc::now();
    let expired = BookingFactory::from_dependencies(db, &deps)
        .status("void")
        .expire_at(Some(now - Duration::minutes(1)))
        .build()
        .await?;
    BookingFactory::from_dependencies(db, &deps)
        .status("void")
        .expire_at(Some(now + Duration::minutes(10)))
        .build()
        .await?;
    BookingFactory::from_dependencies(db, &deps)
        .status("paid")
        .expire_at(Some(now - Duration::minutes(1)))
        .build()
        .await?;

    let deleted = BookingRepository::new(db).delete_expired_void(now).await?;

    assert_eq!(deleted, 1);
    let gone = entity::prelude::Booking::find_by_id(expired.id).one(db).await?;
    assert!(gone.is_none());
    let remaining = entity::prelude::Booking::find().all(db).await?;
    assert_eq!(remaining.len(), 2);

    Ok(())
}
