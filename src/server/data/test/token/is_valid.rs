use super::*;

/// Tests validating a fresh token for its owner.
///
/// Expected: Ok(true)
#[tokio::test]
async fn accepts_unexpired_token_of_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = TokenRepository::new(db);
    repo.create(user.id, "token-1".to_string(), Utc::now() + Duration::days(1))
        .await?;

    assert!(repo.is_valid(user.id, "token-1", Utc::now()).await?);

    Ok(())
}

/// Tests that a token is bound to the user it was issued for.
///
/// Expected: Ok(false)
#[tokio::test]
async fn rejects_token_of_other_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    let repo = TokenRepository::new(db);
    repo.create(owner.id, "token-1".to_string(), Utc::now() + Duration::days(1))
        .await?;

    assert!(!repo.is_valid(other.id, "token-1", Utc::now()).await?);

    Ok(())
}

/// Tests that an expired token no longer validates.
///
/// Expected: Ok(false)
#[tokio::test]
async fn rejects_expired_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = TokenRepository::new(db);
    repo.create(user.id, "old".to_string(), Utc::now() - Duration::minutes(1))
        .await?;

    assert!(!repo.is_valid(user.id, "old", Utc::now()).await?);

    Ok(())
}
