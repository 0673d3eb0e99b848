use super::*;

/// Tests detecting an existing admin.
///
/// Expected: Ok(true)
#[tokio::test]
async fn returns_true_when_admin_exists() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::create_admin(db).await?;

    let result = UserRepository::new(db).admin_exists().await?;

    assert!(result);

    Ok(())
}

/// Tests that suppliers and customers do not count as admins.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_without_admins() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::create_user(db).await?;
    factory::user::create_supplier(db).await?;

    let result = UserRepository::new(db).admin_exists().await?;

    assert!(!result);

    Ok(())
}
