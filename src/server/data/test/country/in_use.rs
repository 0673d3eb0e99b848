use super::*;

/// Tests that a country with locations is reported in use.
///
/// Expected: Ok(true), then Ok(false) for an empty country
#[tokio::test]
async fn reports_country_with_locations() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_location_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let used = factory::country::create_country(db).await?;
    let unused = factory::country::create_country(db).await?;
    factory::location::create_location(db, used.id).await?;

    let repo = CountryRepository::new(db);

    assert!(repo.in_use(used.id).await?);
    assert!(!repo.in_use(unused.id).await?);

    Ok(())
}

/// Tests that locations block deleting their country.
///
/// Expected: Err from the restricting foreign key
#[tokio::test]
async fn delete_fails_while_locations_exist() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_location_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let country = factory::country::create_country(db).await?;
    factory::location::create_location(db, country.id).await?;

    let result = CountryRepository::new(db).delete(country.id).await;

    assert!(result.is_err());

    Ok(())
}
