use super::*;

/// Tests that updating a car replaces its locations and keeps its image.
///
/// Expected: Ok(Some) with the new location set and the stored image
#[tokio::test]
async fn replaces_locations_and_keeps_image() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let supplier = factory::user::create_supplier(db).await?;
    let country = factory::country::create_country(db).await?;
    let old_location = factory::location::create_location(db, country.id).await?;
    let new_location = factory::location::create_location(db, country.id).await?;

    let repo = CarRepository::new(db);
    let car = repo.create(params(supplier.id, vec![old_location.id])).await?;
    repo.set_image(car.id, Some("1_100.jpg".to_string())).await?;

    let mut update = params(supplier.id, vec![new_location.id]);
    update.name = "Dacia Sandero".to_string();
    update.daily_price = 45.0;

    let updated = repo.update(car.id, update).await?.unwrap();

    assert_eq!(updated.name, "Dacia Sandero");
    assert_eq!(updated.daily_price, 45.0);
    assert_eq!(updated.image.as_deref(), Some("1_100.jpg"));
    assert!(updated.serves_location(new_location.id));
    assert!(!updated.serves_location(old_location.id));

    let links = entity::prelude::CarLocation::find().all(db).await?;
    assert_eq!(links.len(), 1);

    Ok(())
}

/// Tests updating a car that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_car() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let supplier = factory::user::create_supplier(db).await?;

    let result = CarRepository::new(db)
        .update(404, params(supplier.id, vec![]))
        .await?;

    assert!(result.is_none());

    Ok(())
}
