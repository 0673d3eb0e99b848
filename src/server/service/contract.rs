//! Rental contracts.
//!
//! A contract is rendered to HTML from the booking and everything it refers to,
//! converted to PDF by an external renderer and stored as `contracts/{booking_id}.pdf`.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::server::{
    config::Config,
    data::{booking::BookingRepository, car::CarRepository, location::LocationRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::{
        booking::{AdditionalDriver, Booking},
        car::Car,
        user::User,
    },
    service::{
        pricing,
        storage::{FileStorage, Folder},
    },
    util::html::escape_html,
};

/// Everything printed on a contract.
#[derive(Debug, Clone)]
pub struct Contract {
    pub booking: Booking,
    pub car: Car,
    pub driver: User,
    pub pickup_location: String,
    pub drop_off_location: String,
    pub additional_driver: Option<AdditionalDriver>,
}

#[derive(Serialize)]
struct RenderRequest<'a> {
    html: &'a str,
}

pub struct ContractService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
    config: &'a Config,
    storage: &'a FileStorage,
}

impl<'a> ContractService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        config: &'a Config,
        storage: &'a FileStorage,
    ) -> Self {
        Self {
            db,
            http_client,
            config,
            storage,
        }
    }

    /// Loads a booking with its car, driver, locations and additional driver.
    pub async fn load(&self, booking_id: i32) -> Result<Option<Contract>, AppError> {
        let booking_repo = BookingRepository::new(self.db);
        let Some(booking) = booking_repo.get_by_id(booking_id).await? else {
            return Ok(None);
        };

        let missing = |what: &str, id: i32| {
            AppError::InternalError(format!("{} {} of booking {} not found", what, id, booking_id))
        };

        let car = CarRepository::new(self.db)
            .get_by_id(booking.car_id)
            .await?
            .ok_or_else(|| missing("Car", booking.car_id))?;
        let driver = UserRepository::new(self.db)
            .find_by_id(booking.driver_id)
            .await?
            .ok_or_else(|| missing("Driver", booking.driver_id))?;

        let location_repo = LocationRepository::new(self.db);
        let pickup_location = location_repo
            .get_by_id(booking.pickup_location_id)
            .await?
            .ok_or_else(|| missing("Location", booking.pickup_location_id))?
            .name;
        let drop_off_location = location_repo
            .get_by_id(booking.drop_off_location_id)
            .await?
            .ok_or_else(|| missing("Location", booking.drop_off_location_id))?
            .name;

        let additional_driver = match booking.additional_driver_id {
            Some(id) => booking_repo.get_additional_driver(id).await?,
            None => None,
        };

        Ok(Some(Contract {
            booking,
            car,
            driver,
            pickup_location,
            drop_off_location,
            additional_driver,
        }))
    }

    /// Renders, converts and stores the contract of a booking.
    ///
    /// Visible to admins, the supplier of the booking and its driver.
    ///
    /// # Returns
    /// - `Ok(Some(name))` - Stored file name under `contracts/`
    /// - `Ok(None)` - No booking with that id
    /// - `Err(AppError::NotFound)` - No PDF renderer configured
    /// - `Err(AppError::ReqwestErr)` - The renderer failed
    pub async fn generate(&self, caller: &User, booking_id: i32) -> Result<Option<String>, AppError> {
        let Some(contract) = self.load(booking_id).await? else {
            return Ok(None);
        };
        check_access(caller, &contract.booking)?;

        let Some(renderer) = &self.config.pdf_renderer_url else {
            return Err(AppError::NotFound(
                "No PDF renderer configured".to_string(),
            ));
        };

        let html = render_contract_html(&contract);
        let pdf = self
            .http_client
            .post(renderer)
            .json(&RenderRequest { html: &html })
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let name = file_name(booking_id);
        self.storage
            .write_named(Folder::Contracts, &name, &pdf)
            .await?;

        tracing::info!("Generated contract of booking {} ({} bytes)", booking_id, pdf.len());

        Ok(Some(name))
    }

    /// Reads a stored contract; `None` when the booking or its contract does not exist.
    pub async fn download(&self, caller: &User, booking_id: i32) -> Result<Option<Vec<u8>>, AppError> {
        let Some(booking) = BookingRepository::new(self.db).get_by_id(booking_id).await? else {
            return Ok(None);
        };
        check_access(caller, &booking)?;

        self.storage
            .read(Folder::Contracts, &file_name(booking_id))
            .await
    }
}

pub fn file_name(booking_id: i32) -> String {
    format!("{}.pdf", booking_id)
}

fn check_access(caller: &User, booking: &Booking) -> Result<(), AppError> {
    if caller.is_admin() || caller.id == booking.supplier_id || caller.id == booking.driver_id {
        return Ok(());
    }

    Err(AuthError::AccessDenied(
        caller.id,
        format!("contract of booking {} belongs to someone else", booking.id),
    )
    .into())
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Price line of a selected option; included options print as such.
fn option_row(label: &str, price: f64, per_day: bool, days: i64) -> String {
    let amount = if price <= 0.0 {
        "Included".to_string()
    } else if per_day {
        format_money(price * days as f64)
    } else {
        format_money(price)
    };

    format!("<tr><td>{}</td><td>{}</td></tr>", label, amount)
}

/// Renders a contract as a standalone HTML document. User supplied text is escaped.
pub fn render_contract_html(contract: &Contract) -> String {
    let booking = &contract.booking;
    let car = &contract.car;
    let supplier = &car.supplier;
    let driver = &contract.driver;
    let days = pricing::days(booking.from, booking.to);

    let mut options = Vec::new();
    let selected = [
        ("Cancellation", booking.options.cancellation, car.cancellation, false),
        ("Amendments", booking.options.amendments, car.amendments, false),
        ("Theft protection", booking.options.theft_protection, car.theft_protection, true),
        (
            "Collision damage waiver",
            booking.options.collision_damage_waiver,
            car.collision_damage_waiver,
            true,
        ),
        ("Full insurance", booking.options.full_insurance, car.full_insurance, true),
        ("Additional driver", booking.options.additional_driver, car.additional_driver, true),
    ];
    for (label, chosen, price, per_day) in selected {
        if chosen && price > -1.0 {
            options.push(option_row(label, price, per_day, days));
        }
    }

    let additional_driver = match &contract.additional_driver {
        Some(d) => format!(
            "<h2>Additional driver</h2><p>{}<br>{}<br>{}<br>Born {}</p>",
            escape_html(&d.full_name),
            escape_html(&d.email),
            escape_html(&d.phone),
            d.birth_date
        ),
        None => String::new(),
    };

    let options = if options.is_empty() {
        "<p>No options selected.</p>".to_string()
    } else {
        format!("<table>{}</table>", options.join(""))
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Rental contract {id}</title></head>
<body>
<h1>Rental contract {id}</h1>
<h2>Supplier</h2>
<p>{supplier_name}<br>{supplier_email}<br>{supplier_phone}<br>{supplier_location}</p>
<h2>Driver</h2>
<p>{driver_name}<br>{driver_email}<br>{driver_phone}<br>Born {driver_birth}</p>
{additional_driver}
<h2>Car</h2>
<p>{car_name}<br>{seats} seats, {doors} doors, {gearbox}, {car_type}<br>Mileage: {mileage}<br>Fuel policy: {fuel_policy}</p>
<h2>Rental</h2>
<table>
<tr><td>Pickup</td><td>{pickup} on {from}</td></tr>
<tr><td>Drop-off</td><td>{drop_off} on {to}</td></tr>
<tr><td>Days</td><td>{days}</td></tr>
<tr><td>Status</td><td>{status}</td></tr>
</table>
<h2>Options</h2>
{options}
<h2>Total</h2>
<p><strong>{price}</strong></p>
<p>Deposit: {deposit}</p>
</body>
</html>
"#,
        id = booking.id,
        supplier_name = escape_html(&supplier.full_name),
        supplier_email = escape_html(&supplier.email),
        supplier_phone = escape_html(supplier.phone.as_deref().unwrap_or("")),
        supplier_location = escape_html(supplier.location.as_deref().unwrap_or("")),
        driver_name = escape_html(&driver.full_name),
        driver_email = escape_html(&driver.email),
        driver_phone = escape_html(driver.phone.as_deref().unwrap_or("")),
        driver_birth = driver
            .birth_date
            .map(|d| d.to_string())
            .unwrap_or_default(),
        additional_driver = additional_driver,
        car_name = escape_html(&car.name),
        seats = car.seats,
        doors = car.doors,
        gearbox = car.gearbox,
        car_type = car.car_type,
        mileage = if car.mileage < 0 {
            "Unlimited".to_string()
        } else {
            format!("{} km", car.mileage)
        },
        fuel_policy = car.fuel_policy,
        pickup = escape_html(&contract.pickup_location),
        from = format_date(booking.from),
        drop_off = escape_html(&contract.drop_off_location),
        to = format_date(booking.to),
        days = days,
        status = booking.status,
        options = options,
        price = format_money(booking.price),
        deposit = format_money(car.deposit),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::enums::{
            BookingStatus, CarRange, CarType, FuelPolicy, Gearbox, UserType,
        },
        server::model::{
            booking::BookingOptions,
            car::CarLocation,
        },
    };
    use chrono::{NaiveDate, TimeZone};

    fn user(id: i32, user_type: UserType, full_name: &str) -> User {
        User {
            id,
            user_type,
            full_name: full_name.to_string(),
            email: format!("user{}@example.com", id),
            phone: None,
            password: None,
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 17),
            verified: true,
            verified_at: None,
            active: true,
            language: "en".to_string(),
            enable_email_notifications: true,
            avatar: None,
            bio: None,
            location: None,
            blacklisted: false,
            pay_later: false,
            license_required: false,
            license: None,
            minimum_rental_days: None,
            price_change_rate: None,
            supplier_car_limit: None,
            notify_admin_on_new_car: false,
            expire_at: None,
            created_at: Utc::now(),
        }
    }

    fn contract(driver_name: &str, options: BookingOptions) -> Contract {
        let from = Utc.with_ymd_and_hms(2026, 7, 1, 10, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2026, 7, 4, 10, 0, 0).unwrap();

        Contract {
            booking: Booking {
                id: 42,
                supplier_id: 1,
                car_id: 7,
                driver_id: 2,
                pickup_location_id: 3,
                drop_off_location_id: 3,
                from,
                to,
                status: BookingStatus::Paid,
                options,
                additional_driver_id: None,
                cancel_request: false,
                price: 321.5,
                session_id: None,
                payment_intent_id: None,
                customer_id: None,
                expire_at: None,
                is_deposit: false,
                is_payed_in_full: true,
                created_at: from,
            },
            car: Car {
                id: 7,
                supplier: user(1, UserType::Supplier, "Sunny Rentals"),
                name: "Compact Hatchback".to_string(),
                minimum_age: 21,
                locations: vec![CarLocation {
                    id: 3,
                    name: "Harbour".to_string(),
                }],
                daily_price: 100.0,
                discounted_daily_price: None,
                bi_weekly_price: None,
                discounted_bi_weekly_price: None,
                weekly_price: None,
                discounted_weekly_price: None,
                monthly_price: None,
                discounted_monthly_price: None,
                deposit: 500.0,
                available: true,
                fully_booked: false,
                coming_soon: false,
                car_type: CarType::Gasoline,
                gearbox: Gearbox::Manual,
                aircon: true,
                image: None,
                seats: 5,
                doors: 4,
                fuel_policy: FuelPolicy::FullToFull,
                mileage: -1,
                cancellation: 0.0,
                amendments: -1.0,
                theft_protection: 7.0,
                collision_damage_waiver: -1.0,
                full_insurance: -1.0,
                additional_driver: -1.0,
                range: CarRange::Midi,
                multimedia: Vec::new(),
                rating: None,
                co2: None,
                trips: 0,
                is_date_based_price: false,
                date_based_prices: Vec::new(),
                created_at: from,
            },
            driver: user(2, UserType::User, driver_name),
            pickup_location: "Harbour".to_string(),
            drop_off_location: "Harbour".to_string(),
            additional_driver: None,
        }
    }

    #[test]
    fn renders_booking_details() {
        let html = render_contract_html(&contract(
            "Jane Doe",
            BookingOptions {
                cancellation: true,
                theft_protection: true,
                ..Default::default()
            },
        ));

        assert!(html.contains("Rental contract 42"));
        assert!(html.contains("Sunny Rentals"));
        assert!(html.contains("Compact Hatchback"));
        assert!(html.contains("<tr><td>Days</td><td>3</td></tr>"));
        assert!(html.contains("<tr><td>Cancellation</td><td>Included</td></tr>"));
        assert!(html.contains("<tr><td>Theft protection</td><td>21.00</td></tr>"));
        assert!(html.contains("<strong>321.50</strong>"));
        assert!(html.contains("Mileage: Unlimited"));
    }

    #[test]
    fn escapes_user_text() {
        let html = render_contract_html(&contract(
            "<script>alert(1)</script>",
            BookingOptions::default(),
        ));

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("No options selected."));
    }

    #[test]
    fn only_parties_of_the_booking_have_access() {
        let c = contract("Jane Doe", BookingOptions::default());

        assert!(check_access(&user(1, UserType::Supplier, "Sunny Rentals"), &c.booking).is_ok());
        assert!(check_access(&user(2, UserType::User, "Jane Doe"), &c.booking).is_ok());
        assert!(check_access(&user(9, UserType::Admin, "Admin"), &c.booking).is_ok());
        assert!(check_access(&user(5, UserType::Supplier, "Other"), &c.booking).is_err());
    }
}
