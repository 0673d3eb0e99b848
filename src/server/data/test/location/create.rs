use super::*;

/// Tests creating a location with parking spots.
///
/// Verifies that the returned location carries its country name and spots.
///
/// Expected: Ok with two parking spots
#[tokio::test]
async fn creates_location_with_parking_spots() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_location_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let country = factory::country::create_country_named(db, "Morocco").await?;

    let location = LocationRepository::new(db)
        .create(CreateLocationParams {
            country_id: country.id,
            name: "Casablanca Airport".to_string(),
            latitude: Some(33.37),
            longitude: Some(-7.58),
            image: None,
            supplier_id: None,
            parking_spots: vec![spot("Terminal 1"), spot("Terminal 2")],
        })
        .await?;

    assert_eq!(location.name, "Casablanca Airport");
    assert_eq!(location.country_name, "Morocco");
    assert_eq!(location.parking_spots.len(), 2);

    Ok(())
}

/// Tests that an unknown country is rejected by the foreign key.
///
/// Expected: Err
#[tokio::test]
async fn fails_for_unknown_country() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_location_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = LocationRepository::new(db)
        .create(CreateLocationParams {
            country_id: 404,
            name: "Nowhere".to_string(),
            latitude: None,
            longitude: None,
            image: None,
            supplier_id: None,
            parking_spots: vec![],
        })
        .await;

    assert!(result.is_err());

    Ok(())
}
