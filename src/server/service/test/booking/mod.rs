use super::*;
use crate::server::{
    data::{booking::BookingRepository, notification::NotificationRepository},
    model::booking::{
        AdditionalDriverParams, BookingOptions, BookingPayload, CheckoutDriver, CheckoutParams,
    },
    service::booking::BookingService,
};
use test_utils::factory::helpers::BookingDependencies;

mod checkout;
mod lifecycle;

/// Three day checkout of the dependency car, starting tomorrow, paid online in full.
fn checkout_params(deps: &BookingDependencies) -> CheckoutParams {
    let from = Utc::now() + Duration::days(1);
    CheckoutParams {
        driver: None,
        car_id: deps.car.id,
        pickup_location_id: deps.location.id,
        drop_off_location_id: deps.location.id,
        from,
        to: from + Duration::days(3),
        options: BookingOptions::default(),
        additional_driver: None,
        pay_later: false,
        pay_deposit: false,
    }
}

fn guest(email: &str) -> CheckoutDriver {
    CheckoutDriver {
        full_name: "Guest Driver".to_string(),
        email: email.to_string(),
        phone: Some("+15550000".to_string()),
        birth_date: NaiveDate::from_ymd_opt(1988, 3, 9).unwrap(),
        language: None,
    }
}

fn additional_driver(email: &str) -> AdditionalDriverParams {
    AdditionalDriverParams {
        full_name: "Second Driver".to_string(),
        email: email.to_string(),
        phone: "+15550001".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1985, 7, 21).unwrap(),
    }
}

async fn counter(db: &DatabaseConnection, user_id: i32) -> i32 {
    NotificationRepository::new(db)
        .get_counter(user_id)
        .await
        .unwrap()
}
