use super::*;

/// Tests deleting users together with their tokens.
///
/// Verifies that token rows are removed by the foreign key cascade.
///
/// Expected: Ok with one row deleted and no token left
#[tokio::test]
async fn deletes_user_and_tokens() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    crate::server::data::token::TokenRepository::new(db)
        .create(user.id, "abc".to_string(), Utc::now() + Duration::hours(1))
        .await?;

    let deleted = UserRepository::new(db).delete_many(vec![user.id]).await?;

    assert_eq!(deleted, 1);
    let tokens = entity::prelude::Token::find().all(db).await?;
    assert!(tokens.is_empty());

    Ok(())
}

/// Tests that an empty id list is a no-op.
///
/// Expected: Ok(0)
#[tokio::test]
async fn ignores_empty_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::create_user(db).await?;

    let deleted = UserRepository::new(db).delete_many(vec![]).await?;

    assert_eq!(deleted, 0);

    Ok(())
}
