use super::*;

mod require_admin;
mod require_supplier;

/// Tests that any signed-in user passes an empty permission list.
///
/// Expected: Ok(User)
#[tokio::test]
async fn accepts_signed_in_user_without_permissions() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session).require(&[]).await?;

    assert_eq!(result.id, user.id);

    Ok(())
}

/// Tests that an empty session is rejected.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn rejects_empty_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests that a session pointing to a deleted account is rejected.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn rejects_deleted_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session).set_user_id(4242).await?;

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(4242)))
    ));

    Ok(())
}

/// Tests that a blacklisted account is refused even with a live session.
///
/// Expected: Err(AuthError::Blacklisted)
#[tokio::test]
async fn rejects_blacklisted_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::UserFactory::new(db)
        .blacklisted(true)
        .build()
        .await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::Blacklisted(_)))
    ));

    Ok(())
}
