use super::*;

/// Tests that marking notifications read and unread keeps the counter in sync.
///
/// Expected: counter 1 after reading one of two, 2 after marking it unread again
#[tokio::test]
async fn keeps_counter_equal_to_unread() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = NotificationRepository::new(db);
    let first = repo.create(user.id, "First".to_string(), None).await?;
    repo.create(user.id, "Second".to_string(), None).await?;

    repo.set_read(user.id, vec![first.id], true).await?;
    assert_eq!(repo.get_counter(user.id).await?, 1);

    // Marking twice does not drift the counter
    repo.set_read(user.id, vec![first.id], true).await?;
    assert_eq!(repo.get_counter(user.id).await?, 1);

    repo.set_read(user.id, vec![first.id], false).await?;
    assert_eq!(repo.get_counter(user.id).await?, 2);

    Ok(())
}

/// Tests that notifications of another user are not touched.
///
/// Expected: Ok(0) and the owner's counter unchanged
#[tokio::test]
async fn ignores_notifications_of_other_users() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let intruder = factory::user::create_user(db).await?;
    let repo = NotificationRepository::new(db);
    let notification = repo.create(owner.id, "Private".to_string(), None).await?;

    let updated = repo
        .set_read(intruder.id, vec![notification.id], true)
        .await?;

    assert_eq!(updated, 0);
    assert_eq!(repo.get_counter(owner.id).await?, 1);

    Ok(())
}
