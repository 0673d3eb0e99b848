use super::*;

/// Tests admin user successfully passes admin permission check.
///
/// Expected: Ok(User) with admin type
#[tokio::test]
async fn grants_access_to_admin_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::user::create_admin(db).await?;
    AuthSession::new(session).set_user_id(admin.id).await?;

    let user = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await?;

    assert!(user.is_admin());

    Ok(())
}

/// Tests that suppliers do not pass the admin check.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_access_to_supplier() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let supplier = factory::user::create_supplier(db).await?;
    AuthSession::new(session).set_user_id(supplier.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}
