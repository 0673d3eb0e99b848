use super::*;
use crate::server::service::notification::NotificationService;

/// Tests the fan-out of a notification by email.
///
/// Expected: a stored notification, counter at 1 and an email only when enabled
#[tokio::test]
async fn notify_emails_when_enabled() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = NotificationService::new(db, &fx.mailer, &fx.push);

    let subscribed = user(db, factory::user::create_user(db).await?.id).await;
    let quiet = user(
        db,
        UserFactory::new(db)
            .enable_email_notifications(false)
            .build()
            .await?
            .id,
    )
    .await;

    let notification = service
        .notify(&subscribed, "Hello", "First message".to_string(), None)
        .await?;
    service
        .notify(&quiet, "Hello", "Second message".to_string(), None)
        .await?;

    assert!(!notification.is_read);
    assert_eq!(service.get_counter(subscribed.id).await?, 1);
    assert_eq!(service.get_counter(quiet.id).await?, 1);

    let outbox = fx.mailer.outbox().await;
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].to, subscribed.email);

    Ok(())
}

/// Tests that the counter follows reads and deletions.
///
/// Expected: the returned count always equals the unread notifications left
#[tokio::test]
async fn counter_tracks_unread_notifications() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = NotificationService::new(db, &fx.mailer, &fx.push);

    let recipient = user(db, factory::user::create_user(db).await?.id).await;
    let mut ids = Vec::new();
    for i in 0..3 {
        let n = service
            .notify(&recipient, "Update", format!("Message {}", i), None)
            .await?;
        ids.push(n.id);
    }

    assert_eq!(service.set_read(recipient.id, vec![ids[0]], true).await?, 2);
    assert_eq!(service.set_read(recipient.id, vec![ids[0]], true).await?, 2);
    assert_eq!(service.delete(recipient.id, vec![ids[1]]).await?, 1);
    assert_eq!(service.set_read(recipient.id, vec![ids[0]], false).await?, 2);

    let page = service.get_paginated(recipient.id, 0, 10).await?;
    assert_eq!(page.total, 2);

    Ok(())
}
