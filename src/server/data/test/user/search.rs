use super::*;

/// Tests filtering users by type and keyword.
///
/// Expected: Ok with only the matching customer
#[tokio::test]
async fn filters_by_type_and_keyword() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db).full_name("Alice Martin").build().await?;
    UserFactory::new(db).full_name("Bob Stone").build().await?;
    UserFactory::new(db)
        .user_type("supplier")
        .full_name("Alice Rentals")
        .build()
        .await?;

    let (users, total) = UserRepository::new(db)
        .search(UserSearchParams {
            user_types: vec![UserType::User],
            keyword: Some("alice".to_string()),
            page: 0,
            per_page: 10,
            ..Default::default()
        })
        .await?;

    assert_eq!(total, 1);
    assert_eq!(users[0].full_name, "Alice Martin");

    Ok(())
}

/// Tests restricting the search to customers who booked with a supplier.
///
/// Expected: Ok with only the driver of the supplier's booking
#[tokio::test]
async fn restricts_to_customers_of_supplier() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deps = factory::helpers::create_booking_dependencies(db).await?;
    let other_driver = factory::user::create_user(db).await?;
    BookingFactory::from_dependencies(db, &deps).build().await?;

    let (users, total) = UserRepository::new(db)
        .search(UserSearchParams {
            customers_of_supplier: Some(deps.supplier.id),
            page: 0,
            per_page: 10,
            ..Default::default()
        })
        .await?;

    assert_eq!(total, 1);
    assert_eq!(users[0].id, deps.driver.id);
    assert!(users.iter().all(|u| u.id != other_driver.id));

    Ok(())
}

/// Tests excluding the caller from the results.
///
/// Expected: Ok without the excluded account
#[tokio::test]
async fn excludes_given_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_admin(db).await?;
    factory::user::create_user(db).await?;

    let (users, total) = UserRepository::new(db)
        .search(UserSearchParams {
            exclude_user_id: Some(admin.id),
            page: 0,
            per_page: 10,
            ..Default::default()
        })
        .await?;

    assert_eq!(total, 1);
    assert!(users.iter().all(|u| u.id != admin.id));

    Ok(())
}
