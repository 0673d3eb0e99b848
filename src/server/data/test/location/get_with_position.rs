use super::*;

/// Tests that only locations with both coordinates are listed for the map.
///
/// Expected: Ok with the positioned location only
#[tokio::test]
async fn lists_only_positioned_locations() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_location_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let country = factory::country::create_country(db).await?;
    let positioned = LocationFactory::new(db, country.id)
        .position(Some((48.85, 2.35)))
        .build()
        .await?;
    LocationFactory::new(db, country.id).build().await?;

    let locations = LocationRepository::new(db).get_with_position().await?;

    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].id, positioned.id);

    Ok(())
}
