use super::*;

/// Tests updating profile fields of a user.
///
/// Verifies that provided optional fields are applied and that omitted ones keep
/// their stored values.
///
/// Expected: Ok(Some) with updated user
#[tokio::test]
async fn updates_profile_fields() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .update(UpdateUserParams {
            id: user.id,
            full_name: "Renamed".to_string(),
            phone: Some("+33123456789".to_string()),
            birth_date: user.birth_date,
            bio: None,
            location: Some("Paris".to_string()),
            language: None,
            enable_email_notifications: Some(false),
            user_type: None,
            blacklisted: None,
            pay_later: None,
        })
        .await?
        .unwrap();

    assert_eq!(updated.full_name, "Renamed");
    assert_eq!(updated.phone.as_deref(), Some("+33123456789"));
    assert_eq!(updated.location.as_deref(), Some("Paris"));
    assert_eq!(updated.language, "en");
    assert!(!updated.enable_email_notifications);
    assert_eq!(updated.user_type, UserType::User);

    Ok(())
}

/// Tests updating a user that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db)
        .update(UpdateUserParams {
            id: 999,
            full_name: "Nobody".to_string(),
            phone: None,
            birth_date: None,
            bio: None,
            location: None,
            language: None,
            enable_email_notifications: None,
            user_type: None,
            blacklisted: None,
            pay_later: None,
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}
