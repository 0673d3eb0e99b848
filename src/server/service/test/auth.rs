use super::*;
use crate::server::service::auth::AuthService;

/// Tests that a self sign-up stays unverified until the mailed link is followed.
///
/// Expected: unverified account with expiry, then verified without expiry
#[tokio::test]
async fn sign_up_then_confirm_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let auth = AuthService::new(db, &fx.mailer, &fx.config);

    let created = auth.sign_up(sign_up_params(" Jane@Example.com ")).await?;

    assert_eq!(created.email, "jane@example.com");
    assert_eq!(created.user_type, UserType::User);
    assert!(!created.verified);
    assert!(created.expire_at.is_some());

    let outbox = fx.mailer.outbox().await;
    assert_eq!(outbox.len(), 1);
    assert!(outbox[0].html.contains("http://frontend.test/"));

    let confirmed = auth
        .confirm_email("jane@example.com", &token_of(&outbox[0]))
        .await?;

    assert!(confirmed.verified);
    assert!(confirmed.expire_at.is_none());

    Ok(())
}

/// Tests that an email can only be registered once.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn sign_up_rejects_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let auth = AuthService::new(db, &fx.mailer, &fx.config);

    auth.sign_up(sign_up_params("jane@example.com")).await?;
    let result = auth.sign_up(sign_up_params("JANE@example.com")).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests that the first admin can sign up alone but later ones need an admin.
///
/// Expected: Ok for the first admin, Err for a guest, Ok when an admin signs up another
#[tokio::test]
async fn admin_sign_up_is_closed_once_an_admin_exists() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let auth = AuthService::new(db, &fx.mailer, &fx.config);

    let first = auth
        .admin_sign_up(sign_up_params("first@example.com"), None)
        .await?;
    assert!(first.is_admin());
    assert!(first.verified);

    let guest = auth
        .admin_sign_up(sign_up_params("guest@example.com"), None)
        .await;
    assert!(matches!(
        guest,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    let customer = user(db, factory::user::create_user(db).await?.id).await;
    let by_customer = auth
        .admin_sign_up(sign_up_params("customer@example.com"), Some(&customer))
        .await;
    assert!(matches!(
        by_customer,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let second = auth
        .admin_sign_up(sign_up_params("second@example.com"), Some(&first))
        .await?;
    assert!(second.is_admin());

    Ok(())
}

/// Tests the sign-in checks against passwords, activation, blacklist and app.
///
/// Verifies that a confirmed email is not required: self sign-ups may sign in before
/// following the confirmation link.
///
/// Expected: Ok for customers on the storefront, Err for each refused case
#[tokio::test]
async fn sign_in_checks() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let auth = AuthService::new(db, &fx.mailer, &fx.config);

    let hash = crate::server::util::password::hash_password("secret123")?;
    let customer = UserFactory::new(db)
        .email("customer@example.com")
        .password_hash(hash.clone())
        .build()
        .await?;
    UserFactory::new(db)
        .email("banned@example.com")
        .password_hash(hash.clone())
        .blacklisted(true)
        .build()
        .await?;
    UserFactory::new(db).email("invited@example.com").build().await?;
    UserFactory::new(db)
        .email("disabled@example.com")
        .password_hash(hash.clone())
        .active(false)
        .build()
        .await?;
    let unconfirmed = UserFactory::new(db)
        .email("unconfirmed@example.com")
        .password_hash(hash.clone())
        .verified(false)
        .build()
        .await?;

    let signed_in = auth
        .sign_in("Customer@Example.com", "secret123", App::Frontend)
        .await?;
    assert_eq!(signed_in.id, customer.id);

    assert!(matches!(
        auth.sign_in("customer@example.com", "wrong-password", App::Frontend).await,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        auth.sign_in("nobody@example.com", "secret123", App::Frontend).await,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        auth.sign_in("customer@example.com", "secret123", App::Admin).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));
    assert!(matches!(
        auth.sign_in("banned@example.com", "secret123", App::Frontend).await,
        Err(AppError::AuthErr(AuthError::Blacklisted(_)))
    ));
    assert!(matches!(
        auth.sign_in("invited@example.com", "secret123", App::Frontend).await,
        Err(AppError::AuthErr(AuthError::NotActivated(_)))
    ));
    assert!(matches!(
        auth.sign_in("disabled@example.com", "secret123", App::Frontend).await,
        Err(AppError::AuthErr(AuthError::NotActivated(_)))
    ));

    let before_confirmation = auth
        .sign_in("unconfirmed@example.com", "secret123", App::Frontend)
        .await?;
    assert_eq!(before_confirmation.id, unconfirmed.id);

    Ok(())
}

/// Tests activating an invited account with the mailed token.
///
/// Expected: the password works afterwards and the token is spent
#[tokio::test]
async fn activate_sets_password_and_spends_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let auth = AuthService::new(db, &fx.mailer, &fx.config);

    let invited = UserFactory::new(db)
        .email("invited@example.com")
        .verified(false)
        .build()
        .await?;

    auth.resend("invited@example.com", false, App::Frontend)
        .await?;
    let token = token_of(&fx.mailer.outbox().await[0]);

    assert!(auth.check_token(invited.id, "invited@example.com", &token).await?);

    let activated = auth.activate(invited.id, &token, "secret123").await?;
    assert!(activated.verified);
    assert!(auth.has_password(invited.id).await?);

    auth.sign_in("invited@example.com", "secret123", App::Frontend)
        .await?;

    let again = auth.activate(invited.id, &token, "another123").await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that the current password is required unless an admin changes someone else's.
///
/// Expected: Err without current password, Ok with it, Ok for an admin override
#[tokio::test]
async fn change_password_requires_current_unless_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let auth = AuthService::new(db, &fx.mailer, &fx.config);

    let hash = crate::server::util::password::hash_password("secret123")?;
    let customer = user(
        db,
        UserFactory::new(db).password_hash(hash).build().await?.id,
    )
    .await;
    let admin = user(db, factory::user::create_admin(db).await?.id).await;

    let missing = auth
        .change_password(&customer, customer.id, None, "newsecret")
        .await;
    assert!(matches!(
        missing,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    auth.change_password(&customer, customer.id, Some("secret123"), "newsecret")
        .await?;
    let reloaded = user(db, customer.id).await;
    assert!(auth.check_password(&reloaded, "newsecret")?);

    auth.change_password(&admin, customer.id, None, "adminset")
        .await?;
    let reloaded = user(db, customer.id).await;
    assert!(auth.check_password(&reloaded, "adminset")?);

    Ok(())
}
