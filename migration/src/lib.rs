pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_user_table;
mod m20260301_000002_create_country_table;
mod m20260301_000003_create_location_table;
mod m20260301_000004_create_parking_spot_table;
mod m20260302_000005_create_car_table;
mod m20260302_000006_create_car_location_table;
mod m20260302_000007_create_date_based_price_table;
mod m20260303_000008_create_additional_driver_table;
mod m20260303_000009_create_booking_table;
mod m20260304_000010_create_notification_tables;
mod m20260304_000011_create_token_table;
mod m20260304_000012_create_push_token_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_user_table::Migration),
            Box::new(m20260301_000002_create_country_table::Migration),
            Box::new(m20260301_000003_create_location_table::Migration),
            Box::new(m20260301_000004_create_parking_spot_table::Migration),
            Box::new(m20260302_000005_create_car_table::Migration),
            Box::new(m20260302_000006_create_car_location_table::Migration),
            Box::new(m20260302_000007_create_date_based_price_table::Migration),
            Box::new(m20260303_000008_create_additional_driver_table::Migration),
            Box::new(m20260303_000009_create_booking_table::Migration),
            Box::new(m20260304_000010_create_notification_tables::Migration),
            Box::new(m20260304_000011_create_token_table::Migration),
            Box::new(m20260304_000012_create_push_token_table::Migration),
        ]
    }
}
