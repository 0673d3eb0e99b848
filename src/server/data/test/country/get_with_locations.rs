use super::*;

/// Tests listing countries together with their locations.
///
/// Verifies that countries without locations are left out.
///
/// Expected: Ok with one country holding two locations
#[tokio::test]
async fn lists_only_countries_with_locations() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_location_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let country = factory::country::create_country_named(db, "Greece").await?;
    factory::country::create_country_named(db, "Empty").await?;
    factory::location::create_location(db, country.id).await?;
    factory::location::create_location(db, country.id).await?;

    let result = CountryRepository::new(db).get_with_locations().await?;

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].country.name, "Greece");
    assert_eq!(result[0].locations.len(), 2);

    Ok(())
}
