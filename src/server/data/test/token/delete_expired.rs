use super::*;

/// Tests purging expired tokens while keeping valid ones.
///
/// Expected: Ok(1) and one token left
#[tokio::test]
async fn deletes_only_expired_tokens() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = TokenRepository::new(db);
    let now = Utc::now();
    repo.create(user.id, "old".to_string(), now - Duration::hours(1))
        .await?;
    repo.create(user.id, "new".to_string(), now + Duration::hours(1))
        .await?;

    let deleted = repo.delete_expired(now).await?;

    assert_eq!(deleted, 1);
    let remaining = entity::prelude::Token::find().all(db).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].token, "new");

    Ok(())
}
