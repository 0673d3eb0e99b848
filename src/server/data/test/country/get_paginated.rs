use super::*;

/// Tests paging through countries filtered by keyword.
///
/// Expected: Ok with matching countries and their total
#[tokio::test]
async fn filters_by_keyword() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_location_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::country::create_country_named(db, "Portugal").await?;
    factory::country::create_country_named(db, "Poland").await?;
    factory::country::create_country_named(db, "Italy").await?;

    let repo = CountryRepository::new(db);
    let (countries, total) = repo.get_paginated(Some("po"), 0, 10).await?;

    assert_eq!(total, 2);
    assert!(countries.iter().all(|c| c.name.starts_with("Po")));

    Ok(())
}

/// Tests that a page size of zero is treated as one.
///
/// Expected: Ok with a single country
#[tokio::test]
async fn clamps_zero_page_size() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_location_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::country::create_country(db).await?;
    factory::country::create_country(db).await?;

    let (countries, total) = CountryRepository::new(db)
        .get_paginated(None, 0, 0)
        .await?;

    assert_eq!(total, 2);
    assert_eq!(countries.len(), 1);

    Ok(())
}
