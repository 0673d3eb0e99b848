use super::*;

/// Tests creating a car served at two locations with date based prices.
///
/// Verifies that the returned car resolves its supplier, locations and prices.
///
/// Expected: Ok with relations attached
#[tokio::test]
async fn creates_car_with_relations() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let supplier = factory::user::create_supplier(db).await?;
    let country = factory::country::create_country(db).await?;
    let first = factory::location::create_location(db, country.id).await?;
    let second = factory::location::create_location(db, country.id).await?;

    let mut car_params = params(supplier.id, vec![first.id, second.id, first.id]);
    car_params.is_date_based_price = true;
    car_params.date_based_prices = vec![DateBasedPrice {
        start_date: NaiveDate::from_ymd_opt(2030, 7, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2030, 8, 31).unwrap(),
        daily_price: 65.0,
    }];

    let car = CarRepository::new(db).create(car_params).await?;

    assert_eq!(car.name, "Dacia Logan");
    assert_eq!(car.supplier.id, supplier.id);
    assert_eq!(car.locations.len(), 2);
    assert_eq!(car.multimedia, vec![Multimedia::Bluetooth]);
    assert_eq!(car.date_based_prices.len(), 1);
    assert_eq!(car.trips, 0);
    assert!(car.serves_location(second.id));
    assert!(!car.offers_additional_driver());

    Ok(())
}

/// Tests that a car cannot reference an unknown supplier.
///
/// Expected: Err
#[tokio::test]
async fn fails_for_unknown_supplier() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = CarRepository::new(db).create(params(999, vec![])).await;

    assert!(result.is_err());

    Ok(())
}
