use super::*;

/// Tests filtering cars by supplier, gearbox and mileage.
///
/// Expected: Ok with the single automatic limited-mileage car of the supplier
#[tokio::test]
async fn combines_filters() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let supplier = factory::user::create_supplier(db).await?;
    let other = factory::user::create_supplier(db).await?;

    let target = CarFactory::new(db, supplier.id)
        .gearbox("automatic")
        .mileage(200)
        .build()
        .await?;
    CarFactory::new(db, supplier.id)
        .gearbox("automatic")
        .build()
        .await?;
    CarFactory::new(db, supplier.id).mileage(200).build().await?;
    CarFactory::new(db, other.id)
        .gearbox("automatic")
        .mileage(200)
        .build()
        .await?;

    let filter = CarFilter {
        suppliers: vec![supplier.id],
        gearboxes: vec![Gearbox::Automatic],
        mileage: Some(Mileage::Limited),
        ..Default::default()
    };
    let (cars, total) = CarRepository::new(db).search(&filter, 0, 10).await?;

    assert_eq!(total, 1);
    assert_eq!(cars[0].id, target.id);

    Ok(())
}

/// Tests that every requested multimedia feature must be present.
///
/// Expected: Ok with only the car offering both features
#[tokio::test]
async fn requires_all_multimedia_features() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let supplier = factory::user::create_supplier(db).await?;
    let both = CarFactory::new(db, supplier.id)
        .multimedia("bluetooth,touchscreen")
        .build()
        .await?;
    CarFactory::new(db, supplier.id)
        .multimedia("bluetooth")
        .build()
        .await?;

    let filter = CarFilter {
        multimedia: vec![Multimedia::Touchscreen, Multimedia::Bluetooth],
        ..Default::default()
    };
    let (cars, total) = CarRepository::new(db).search(&filter, 0, 10).await?;

    assert_eq!(total, 1);
    assert_eq!(cars[0].id, both.id);

    Ok(())
}

/// Tests the keyword and minimum seats filters.
///
/// Expected: Ok with the large matching car
#[tokio::test]
async fn filters_by_keyword_and_seats() -> Result<(), AppError> {
    let test = TestBuilder::new().with_car_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let supplier = factory::user::create_supplier(db).await?;
    let van = CarFactory::new(db, supplier.id)
        .name("Renault Trafic")
        .seats(9)
        .build()
        .await?;
    CarFactory::new(db, supplier.id)
        .name("Renault Clio")
        .seats(5)
        .build()
        .await?;

    let filter = CarFilter {
        keyword: Some("renault".to_string()),
        seats_min: Some(6),
        ..Default::default()
    };
    let (cars, total) = CarRepository::new(db).search(&filter, 0, 10).await?;

    assert_eq!(total, 1);
    assert_eq!(cars[0].id, van.id);

    Ok(())
}
