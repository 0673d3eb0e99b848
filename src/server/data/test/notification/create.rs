use super::*;

/// Tests that creating notifications bumps the unread counter.
///
/// Expected: Ok with counter equal to the number of notifications
#[tokio::test]
async fn increments_counter() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = NotificationRepository::new(db);

    assert_eq!(repo.get_counter(user.id).await?, 0);

    repo.create(user.id, "First".to_string(), None).await?;
    let second = repo.create(user.id, "Second".to_string(), None).await?;

    assert!(!second.is_read);
    assert_eq!(repo.get_counter(user.id).await?, 2);

    let (notifications, total) = repo.get_paginated(user.id, 0, 10).await?;
    assert_eq!(total, 2);
    assert_eq!(notifications[0].id, second.id);

    Ok(())
}
