use super::*;

/// Tests creating a customer account.
///
/// Verifies that the repository stores the lowercase email passed in, the language,
/// and leaves the account unverified and inactive until the activation link is used.
///
/// Expected: Ok with unverified user
#[tokio::test]
async fn creates_unverified_customer() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(CreateUserParams::customer(
            "Jane Driver".to_string(),
            "jane@test.local".to_string(),
            "fr".to_string(),
        ))
        .await?;

    assert_eq!(user.full_name, "Jane Driver");
    assert_eq!(user.email, "jane@test.local");
    assert_eq!(user.language, "fr");
    assert_eq!(user.user_type, UserType::User);
    assert!(!user.verified);

    let stored = entity::prelude::User::find_by_id(user.id).one(db).await?;
    assert!(stored.is_some());

    Ok(())
}

/// Tests that the email column is unique.
///
/// Expected: Err on second insert with the same email
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(CreateUserParams::customer(
        "First".to_string(),
        "same@test.local".to_string(),
        "en".to_string(),
    ))
    .await?;

    let result = repo
        .create(CreateUserParams::customer(
            "Second".to_string(),
            "same@test.local".to_string(),
            "en".to_string(),
        ))
        .await;

    assert!(result.is_err());

    Ok(())
}
