use super::*;

/// Tests deleting an unread notification lowers the counter.
///
/// Expected: Ok(1) and counter 0
#[tokio::test]
async fn deletes_and_recounts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = NotificationRepository::new(db);
    let notification = repo.create(user.id, "Bye".to_string(), None).await?;

    let deleted = repo.delete(user.id, vec![notification.id]).await?;

    assert_eq!(deleted, 1);
    assert_eq!(repo.get_counter(user.id).await?, 0);

    Ok(())
}
