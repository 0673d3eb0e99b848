use super::*;

/// Tests that guests resolve to no user instead of an error.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_guest() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = AuthGuard::new(db, session).optional().await?;

    assert!(user.is_none());

    Ok(())
}

/// Tests that a signed-in user is resolved, and cleared again after sign-out.
///
/// Expected: Ok(Some) then Ok(None)
#[tokio::test]
async fn resolves_signed_in_user_until_cleared() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let customer = factory::user::create_user(db).await?;
    let auth_session = AuthSession::new(session);
    auth_session.set_user_id(customer.id).await?;

    let user = AuthGuard::new(db, session).optional().await?;
    assert_eq!(user.map(|u| u.id), Some(customer.id));

    auth_session.clear().await?;

    let user = AuthGuard::new(db, session).optional().await?;
    assert!(user.is_none());

    Ok(())
}
