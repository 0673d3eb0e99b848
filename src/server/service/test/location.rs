use super::*;
use crate::server::{
    model::location::{CreateLocationParams, ParkingSpotParams},
    service::location::LocationService,
};

fn location_params(country_id: i32, name: &str) -> CreateLocationParams {
    CreateLocationParams {
        country_id,
        name: name.to_string(),
        latitude: Some(38.77),
        longitude: Some(-9.13),
        image: None,
        supplier_id: None,
        parking_spots: vec![ParkingSpotParams {
            name: "Terminal 1".to_string(),
            latitude: 38.78,
            longitude: -9.13,
        }],
    }
}

/// Tests the checks on a new location.
///
/// Expected: BadRequest for an unknown country, Conflict for a taken name
#[tokio::test]
async fn create_checks_country_and_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_location_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = LocationService::new(db, &fx.storage);

    let country = factory::country::create_country(db).await?;

    let unknown = service
        .create(location_params(country.id + 100, "Lisbon Airport"))
        .await;
    assert!(matches!(unknown, Err(AppError::BadRequest(_))));

    let created = service
        .create(location_params(country.id, "Lisbon Airport"))
        .await?;
    assert_eq!(created.parking_spots.len(), 1);
    assert_eq!(created.country_name, country.name);

    let taken = service
        .create(location_params(country.id, "Lisbon Airport"))
        .await;
    assert!(matches!(taken, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests that a location naming a missing temporary image is not saved.
///
/// Expected: NotFound, then the same name is still free
#[tokio::test]
async fn create_with_unknown_image_saves_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_location_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = LocationService::new(db, &fx.storage);

    let country = factory::country::create_country(db).await?;

    let mut params = location_params(country.id, "Porto Airport");
    params.image = Some("missing_1700000000000.png".to_string());
    let result = service.create(params).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(service.name_available("Porto Airport").await?);

    Ok(())
}

/// Tests that a location served by a car cannot be deleted.
///
/// Expected: Conflict while in use, Ok(true) for an unused location
#[tokio::test]
async fn delete_refuses_location_in_use() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fx = Fixture::new();
    let service = LocationService::new(db, &fx.storage);

    let supplier = factory::user::create_supplier(db).await?;
    let country = factory::country::create_country(db).await?;
    let used = factory::location::create_location(db, country.id).await?;
    let unused = factory::location::create_location(db, country.id).await?;
    CarFactory::new(db, supplier.id)
        .locations(vec![used.id])
        .build()
        .await?;

    assert!(matches!(
        service.delete(used.id).await,
        Err(AppError::Conflict(_))
    ));
    assert!(service.delete(unused.id).await?);
    assert!(service.get(unused.id).await?.is_none());

    Ok(())
}
