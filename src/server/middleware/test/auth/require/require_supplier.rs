use super::*;

/// Tests that both suppliers and admins pass the supplier check.
///
/// Expected: Ok(User) for each
#[tokio::test]
async fn grants_access_to_supplier_and_admin() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let supplier = factory::user::create_supplier(db).await?;
    let admin = factory::user::create_admin(db).await?;

    for id in [supplier.id, admin.id] {
        AuthSession::new(session).set_user_id(id).await?;
        let user = AuthGuard::new(db, session)
            .require(&[Permission::Supplier])
            .await?;
        assert_eq!(user.id, id);
    }

    Ok(())
}

/// Tests that customers are denied supplier routes.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_access_to_customer() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let customer = factory::user::create_user(db).await?;
    AuthSession::new(session).set_user_id(customer.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Supplier])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests that a supplier can only act on its own records.
///
/// Expected: Ok for its own id, Err(AuthError::AccessDenied) for another supplier
#[tokio::test]
async fn ensure_owner_limits_suppliers_to_own_records() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let supplier = factory::user::create_supplier(db).await?;
    let other = factory::user::create_supplier(db).await?;
    AuthSession::new(session).set_user_id(supplier.id).await?;

    let user = AuthGuard::new(db, session)
        .require(&[Permission::Supplier])
        .await?;

    assert!(ensure_owner(&user, supplier.id).is_ok());
    assert!(matches!(
        ensure_owner(&user, other.id),
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}
