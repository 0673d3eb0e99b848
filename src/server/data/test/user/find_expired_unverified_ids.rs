use super::*;

/// Tests finding accounts whose activation window has passed.
///
/// Expected: Ok with only the expired unverified account
#[tokio::test]
async fn finds_only_expired_unverified_accounts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let expired = UserFactory::new(db)
        .verified(false)
        .expire_at(Some(now - Duration::minutes(5)))
        .build()
        .await?;
    UserFactory::new(db)
        .verified(false)
        .expire_at(Some(now + Duration::hours(1)))
        .build()
        .await?;
    UserFactory::new(db)
        .verified(true)
        .expire_at(None)
        .build()
        .await?;

    let ids = UserRepository::new(db)
        .find_expired_unverified_ids(now)
        .await?;

    assert_eq!(ids, vec![expired.id]);

    Ok(())
}
