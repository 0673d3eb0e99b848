use super::*;

/// Tests that updating a location replaces its parking spots.
///
/// Expected: Ok(Some) with only the new spot stored
#[tokio::test]
async fn replaces_parking_spots() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_location_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let country = factory::country::create_country(db).await?;
    let repo = LocationRepository::new(db);
    let location = repo
        .create(CreateLocationParams {
            country_id: country.id,
            name: "Harbour".to_string(),
            latitude: None,
            longitude: None,
            image: None,
            supplier_id: None,
            parking_spots: vec![spot("Old A"), spot("Old B")],
        })
        .await?;

    let updated = repo
        .update(UpdateLocationParams {
            id: location.id,
            country_id: country.id,
            name: "Harbour North".to_string(),
            latitude: Some(1.0),
            longitude: Some(2.0),
            parking_spots: vec![spot("New")],
        })
        .await?
        .unwrap();

    assert_eq!(updated.name, "Harbour North");
    assert_eq!(updated.parking_spots.len(), 1);
    assert_eq!(updated.parking_spots[0].name, "New");

    let stored = entity::prelude::ParkingSpot::find().all(db).await?;
    assert_eq!(stored.len(), 1);

    Ok(())
}

/// Tests updating a location that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_location() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_location_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let country = factory::country::create_country(db).await?;

    let result = LocationRepository::new(db)
        .update(UpdateLocationParams {
            id: 999,
            country_id: country.id,
            name: "Ghost".to_string(),
            latitude: None,
            longitude: None,
            parking_spots: vec![],
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}
