use super::*;

/// Tests creating a country owned by a supplier.
///
/// Expected: Ok with the stored country
#[tokio::test]
async fn creates_country() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_location_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let supplier = factory::user::create_supplier(db).await?;

    let repo = CountryRepository::new(db);
    let country = repo
        .create(CreateCountryParams {
            name: "Morocco".to_string(),
            supplier_id: Some(supplier.id),
        })
        .await?;

    assert_eq!(country.name, "Morocco");
    assert_eq!(country.supplier_id, Some(supplier.id));

    let stored = repo.get_by_id(country.id).await?;
    assert_eq!(stored, Some(country));

    Ok(())
}

/// Tests the name uniqueness check, ignoring the country being edited.
///
/// Expected: true for another country, false when excluding itself
#[tokio::test]
async fn detects_existing_name() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_location_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let country = factory::country::create_country_named(db, "France").await?;

    let repo = CountryRepository::new(db);

    assert!(repo.name_exists("France", None).await?);
    assert!(!repo.name_exists("France", Some(country.id)).await?);
    assert!(!repo.name_exists("Spain", None).await?);

    Ok(())
}
