//! Booking service for business logic.
//!
//! Covers bookings entered from the back-office and the storefront checkout. A
//! checkout that has to be paid online starts as a `void` booking with a session id
//! and an expiry; it becomes `deposit` or `paid` once the payment is confirmed, or
//! is purged by the scheduler when the session expires. Drivers, suppliers and
//! admins are notified of every step that concerns them; notification failures
//! are logged and never fail the booking operation.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::enums::{App, BookingStatus},
    server::{
        config::Config,
        data::{
            booking::BookingRepository, car::CarRepository, location::LocationRepository,
            user::UserRepository,
        },
        error::{auth::AuthError, AppError},
        middleware::auth::ensure_owner,
        model::{
            booking::{
                AdditionalDriverParams, Booking, BookingDetail, BookingOptions, BookingPayload,
                BookingSearchParams, CheckoutParams, CheckoutResult, ConfirmPaymentParams,
                CreateBookingParams, PaginatedBookings, UpdateBookingParams,
            },
            car::Car,
            page_count,
            user::{CreateUserParams, User},
        },
        service::{
            auth::{AuthService, TokenLink},
            mail::Mailer,
            notification::NotificationService,
            pricing::{self, PriceSheet},
            push::PushService,
        },
        util::{
            random::{random_code, TOKEN_LENGTH},
            validate::{age_at, validate_email, validate_name},
        },
    },
};

pub struct BookingService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
    mailer: &'a Mailer,
    push: &'a PushService,
}

impl<'a> BookingService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        config: &'a Config,
        mailer: &'a Mailer,
        push: &'a PushService,
    ) -> Self {
        Self {
            db,
            config,
            mailer,
            push,
        }
    }

    /// Number of days and total price of renting a car, supplier rate included.
    ///
    /// # Returns
    /// - `Ok((days, price))` - Quote for the period
    /// - `Err(AppError::NotFound)` - Unknown car
    /// - `Err(AppError::BadRequest)` - Invalid period or option not offered by the car
    pub async fn quote(
        &self,
        car_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        options: BookingOptions,
    ) -> Result<(i64, f64), AppError> {
        check_period(from, to)?;

        let Some(car) = CarRepository::new(self.db).get_by_id(car_id).await? else {
            return Err(AppError::NotFound(format!("Car {} not found", car_id)));
        };
        check_options(&car, &options)?;

        Ok((pricing::days(from, to), price_of(&car, from, to, &options)))
    }

    /// Creates a booking from the back-office.
    ///
    /// Suppliers may only book their own cars. The price is computed from the car
    /// when the payload does not carry one.
    ///
    /// # Returns
    /// - `Ok(Booking)` - The new booking
    /// - `Err(AppError::BadRequest)` - Unknown car, driver or location, invalid period
    ///   or options
    /// - `Err(AuthError::AccessDenied)` - A supplier booked another supplier's car
    pub async fn create(&self, caller: &User, payload: BookingPayload) -> Result<Booking, AppError> {
        let car = self.check_payload(caller, &payload).await?;

        let booking_repo = BookingRepository::new(self.db);
        let additional_driver_id = match (payload.options.additional_driver, payload.additional_driver) {
            (true, Some(params)) => {
                let params = check_additional_driver(&car, params, payload.from)?;
                Some(self.create_additional_driver(&car, params).await?)
            }
            _ => None,
        };

        let price = payload
            .price
            .unwrap_or_else(|| price_of(&car, payload.from, payload.to, &payload.options));

        let booking = booking_repo
            .create(CreateBookingParams {
                supplier_id: car.supplier.id,
                car_id: car.id,
                driver_id: payload.driver_id,
                pickup_location_id: payload.pickup_location_id,
                drop_off_location_id: payload.drop_off_location_id,
                from: payload.from,
                to: payload.to,
                status: payload.status,
                options: payload.options,
                additional_driver_id,
                price,
                session_id: None,
                expire_at: None,
                is_deposit: false,
                is_payed_in_full: false,
            })
            .await?;

        tracing::info!("User {} created booking {}", caller.id, booking.id);

        Ok(booking)
    }

    /// Replaces the fields of a booking; `None` when it does not exist.
    ///
    /// The additional driver record is created, updated or removed to follow the
    /// selected option. The driver is notified when the status changes.
    pub async fn update(
        &self,
        caller: &User,
        id: i32,
        payload: BookingPayload,
    ) -> Result<Option<Booking>, AppError> {
        let booking_repo = BookingRepository::new(self.db);
        let Some(existing) = booking_repo.get_by_id(id).await? else {
            return Ok(None);
        };
        ensure_owner(caller, existing.supplier_id)?;

        let car = self.check_payload(caller, &payload).await?;

        let mut stale_driver = None;
        let additional_driver_id = match (
            payload.options.additional_driver,
            payload.additional_driver,
            existing.additional_driver_id,
        ) {
            (true, Some(params), Some(driver_id)) => {
                let params = check_additional_driver(&car, params, payload.from)?;
                booking_repo
                    .update_additional_driver(driver_id, params)
                    .await?
                    .map(|d| d.id)
            }
            (true, Some(params), None) => {
                let params = check_additional_driver(&car, params, payload.from)?;
                Some(self.create_additional_driver(&car, params).await?)
            }
            (true, None, current) => current,
            (false, _, current) => {
                stale_driver = current;
                None
            }
        };

        let price = payload
            .price
            .unwrap_or_else(|| price_of(&car, payload.from, payload.to, &payload.options));

        let Some(booking) = booking_repo
            .update(UpdateBookingParams {
                id,
                supplier_id: car.supplier.id,
                car_id: car.id,
                driver_id: payload.driver_id,
                pickup_location_id: payload.pickup_location_id,
                drop_off_location_id: payload.drop_off_location_id,
                from: payload.from,
                to: payload.to,
                status: payload.status,
                options: payload.options,
                additional_driver_id,
                price,
            })
            .await?
        else {
            return Ok(None);
        };

        if let Some(driver_id) = stale_driver {
            booking_repo.delete_additional_drivers(vec![driver_id]).await?;
        }

        if booking.status != existing.status {
            self.notify_status_change(&booking).await;
        }

        Ok(Some(booking))
    }

    /// Validates a back-office payload and returns the booked car.
    async fn check_payload(&self, caller: &User, payload: &BookingPayload) -> Result<Car, AppError> {
        check_period(payload.from, payload.to)?;

        let Some(car) = CarRepository::new(self.db).get_by_id(payload.car_id).await? else {
            return Err(AppError::BadRequest(format!(
                "Car {} does not exist",
                payload.car_id
            )));
        };
        ensure_owner(caller, car.supplier.id)?;

        if UserRepository::new(self.db)
            .find_by_id(payload.driver_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "Driver {} does not exist",
                payload.driver_id
            )));
        }

        self.check_locations(&car, payload.pickup_location_id, payload.drop_off_location_id)
            .await?;
        check_options(&car, &payload.options)?;

        Ok(car)
    }

    async fn check_locations(
        &self,
        car: &Car,
        pickup_location_id: i32,
        drop_off_location_id: i32,
    ) -> Result<(), AppError> {
        if !car.serves_location(pickup_location_id) {
            return Err(AppError::BadRequest(format!(
                "Car {} is not available at location {}",
                car.id, pickup_location_id
            )));
        }

        if LocationRepository::new(self.db)
            .get_by_id(drop_off_location_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "Location {} does not exist",
                drop_off_location_id
            )));
        }

        Ok(())
    }

    /// Inserts an additional driver already checked by [`check_additional_driver`].
    async fn create_additional_driver(
        &self,
        car: &Car,
        params: AdditionalDriverParams,
    ) -> Result<i32, AppError> {
        let driver = BookingRepository::new(self.db)
            .create_additional_driver(params)
            .await?;

        tracing::debug!("Created additional driver {} for car {}", driver.id, car.id);

        Ok(driver.id)
    }

    /// Books a car from the storefront.
    ///
    /// Guests get an unverified customer account with an activation link. Bookings
    /// paid later are `pending` right away; the others are `void` with a session id
    /// and an expiry until [`BookingService::confirm`] is called.
    ///
    /// # Returns
    /// - `Ok(CheckoutResult)` - The booking and the amount to charge now
    /// - `Err(AppError::NotFound)` - Unknown car
    /// - `Err(AppError::BadRequest)` - The car, period, driver or options are not acceptable
    /// - `Err(AppError::Conflict)` - The car is booked for the period, or a guest used
    ///   the email of an existing account
    pub async fn checkout(
        &self,
        caller: Option<&User>,
        params: CheckoutParams,
    ) -> Result<CheckoutResult, AppError> {
        check_period(params.from, params.to)?;

        let Some(car) = CarRepository::new(self.db).get_by_id(params.car_id).await? else {
            return Err(AppError::NotFound(format!("Car {} not found", params.car_id)));
        };

        if !car.available || car.coming_soon {
            return Err(AppError::BadRequest(format!(
                "Car {} cannot be booked",
                car.id
            )));
        }

        self.check_locations(&car, params.pickup_location_id, params.drop_off_location_id)
            .await?;
        check_options(&car, &params.options)?;

        let supplier = &car.supplier;
        let days = pricing::days(params.from, params.to);
        if let Some(minimum) = supplier.minimum_rental_days {
            if days < i64::from(minimum) {
                return Err(AppError::BadRequest(format!(
                    "{} requires rentals of at least {} days",
                    supplier.full_name, minimum
                )));
            }
        }

        if params.pay_later && !supplier.pay_later {
            return Err(AppError::BadRequest(format!(
                "{} does not accept payment at pickup",
                supplier.full_name
            )));
        }

        let birth_date = match (caller, &params.driver) {
            (Some(user), _) => user.birth_date,
            (None, Some(driver)) => Some(driver.birth_date),
            (None, None) => {
                return Err(AppError::BadRequest(
                    "Driver details are required".to_string(),
                ))
            }
        };
        let Some(birth_date) = birth_date else {
            return Err(AppError::BadRequest("Driver birth date is required".to_string()));
        };
        if age_at(birth_date, params.from) < car.minimum_age {
            return Err(AppError::BadRequest(format!(
                "The driver must be at least {} years old",
                car.minimum_age
            )));
        }

        if supplier.license_required && !caller.is_some_and(|user| user.license.is_some()) {
            return Err(AppError::BadRequest(format!(
                "{} requires a driver license on file",
                supplier.full_name
            )));
        }

        let additional_driver = match (params.options.additional_driver, params.additional_driver) {
            (true, Some(driver)) => Some(check_additional_driver(&car, driver, params.from)?),
            (true, None) => {
                return Err(AppError::BadRequest(
                    "Additional driver details are required".to_string(),
                ))
            }
            (false, _) => None,
        };

        let booking_repo = BookingRepository::new(self.db);
        if booking_repo
            .car_is_booked(car.id, params.from, params.to, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Car {} is already booked for these dates",
                car.id
            )));
        }

        let driver = match (caller, params.driver) {
            (Some(user), _) => user.clone(),
            (None, Some(guest)) => {
                let email = validate_email(&guest.email)?;
                let full_name = validate_name("Full name", &guest.full_name)?;

                let user_repo = UserRepository::new(self.db);
                if user_repo.email_exists(&email).await? {
                    return Err(AppError::Conflict(format!(
                        "Email {} is already registered, please sign in",
                        email
                    )));
                }

                let auth = AuthService::new(self.db, self.mailer, self.config);
                let mut user_params = CreateUserParams::customer(
                    full_name,
                    email,
                    guest
                        .language
                        .unwrap_or_else(|| self.config.default_language.clone()),
                );
                user_params.phone = guest.phone;
                user_params.birth_date = Some(guest.birth_date);
                if !params.pay_later {
                    user_params.expire_at = Some(auth.user_expiry());
                }

                let user = user_repo.create(user_params).await?;
                auth.send_token_link(&user, TokenLink::Activate, App::Frontend)
                    .await?;

                tracing::info!("Created customer {} during checkout", user.id);
                user
            }
            (None, None) => {
                return Err(AppError::BadRequest(
                    "Driver details are required".to_string(),
                ))
            }
        };

        let additional_driver_id = match additional_driver {
            Some(params) => Some(self.create_additional_driver(&car, params).await?),
            None => None,
        };

        let price = price_of(&car, params.from, params.to, &params.options);
        let (status, session_id, expire_at) = if params.pay_later {
            (BookingStatus::Pending, None, None)
        } else {
            (
                BookingStatus::Void,
                Some(random_code(TOKEN_LENGTH)),
                Some(Utc::now() + Duration::seconds(self.config.booking_expire_seconds)),
            )
        };
        let is_deposit = !params.pay_later && params.pay_deposit;

        let booking = booking_repo
            .create(CreateBookingParams {
                supplier_id: supplier.id,
                car_id: car.id,
                driver_id: driver.id,
                pickup_location_id: params.pickup_location_id,
                drop_off_location_id: params.drop_off_location_id,
                from: params.from,
                to: params.to,
                status,
                options: params.options,
                additional_driver_id,
                price,
                session_id,
                expire_at,
                is_deposit,
                is_payed_in_full: false,
            })
            .await?;

        let amount_due = if params.pay_later {
            0.0
        } else if is_deposit {
            pricing::deposit_amount(&car, supplier.price_change_rate)
        } else {
            price
        };

        if booking.status != BookingStatus::Void {
            self.notify_new_booking(&booking, &driver, supplier).await;
        }

        tracing::info!(
            "Driver {} checked out booking {} ({})",
            driver.id,
            booking.id,
            booking.status
        );

        Ok(CheckoutResult {
            booking,
            amount_due,
        })
    }

    /// Confirms the payment of a checkout session.
    ///
    /// # Returns
    /// - `Ok(Booking)` - The booking, now `deposit` or `paid`
    /// - `Err(AppError::NotFound)` - No booking for that session
    /// - `Err(AppError::Conflict)` - The booking was already confirmed
    pub async fn confirm(
        &self,
        session_id: &str,
        payment_intent_id: Option<String>,
        customer_id: Option<String>,
    ) -> Result<Booking, AppError> {
        let booking_repo = BookingRepository::new(self.db);
        let Some(booking) = booking_repo.find_by_session_id(session_id).await? else {
            return Err(AppError::NotFound(format!(
                "No booking for session {}",
                session_id
            )));
        };

        if booking.status != BookingStatus::Void {
            return Err(AppError::Conflict(format!(
                "Booking {} is already confirmed",
                booking.id
            )));
        }

        let status = if booking.is_deposit {
            BookingStatus::Deposit
        } else {
            BookingStatus::Paid
        };

        let booking = booking_repo
            .confirm_payment(
                booking.id,
                ConfirmPaymentParams {
                    status,
                    payment_intent_id,
                    customer_id,
                    is_deposit: booking.is_deposit,
                    is_payed_in_full: !booking.is_deposit,
                },
            )
            .await?
            .ok_or(AppError::InternalError(format!(
                "Booking {} vanished during confirmation",
                booking.id
            )))?;

        let user_repo = UserRepository::new(self.db);
        let driver = user_repo.find_by_id(booking.driver_id).await?;
        let supplier = user_repo.find_by_id(booking.supplier_id).await?;

        if let Some(driver) = &driver {
            if !driver.verified {
                user_repo.clear_expiry(driver.id).await?;
            }

            self.notify(
                driver,
                "Booking confirmed",
                format!("Your booking {} is confirmed.", booking.id),
                booking.id,
            )
            .await;
        }

        if let (Some(driver), Some(supplier)) = (&driver, &supplier) {
            self.notify_new_booking(&booking, driver, supplier).await;
        }

        tracing::info!("Confirmed payment of booking {}", booking.id);

        Ok(booking)
    }

    /// Sets the status of several bookings. Suppliers only change their own.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of bookings whose status changed
    pub async fn update_status(
        &self,
        caller: &User,
        ids: Vec<i32>,
        status: BookingStatus,
    ) -> Result<u64, AppError> {
        let booking_repo = BookingRepository::new(self.db);
        let changed: Vec<Booking> = booking_repo
            .get_by_ids(ids)
            .await?
            .into_iter()
            .filter(|b| caller.is_admin() || b.supplier_id == caller.id)
            .filter(|b| b.status != status)
            .collect();

        let updated = booking_repo
            .update_status(changed.iter().map(|b| b.id).collect(), status)
            .await?;

        for mut booking in changed {
            booking.status = status;
            self.notify_status_change(&booking).await;
        }

        Ok(updated)
    }

    /// Deletes bookings with their additional drivers. Suppliers only delete their own.
    pub async fn delete_many(&self, caller: &User, ids: Vec<i32>) -> Result<u64, AppError> {
        let booking_repo = BookingRepository::new(self.db);
        let owned: Vec<i32> = booking_repo
            .get_by_ids(ids)
            .await?
            .into_iter()
            .filter(|b| caller.is_admin() || b.supplier_id == caller.id)
            .map(|b| b.id)
            .collect();

        let deleted = booking_repo.delete_many(owned).await?;
        tracing::info!("User {} deleted {} bookings", caller.id, deleted);

        Ok(deleted)
    }

    /// Abandons an unpaid checkout.
    ///
    /// The guest account created by the checkout goes with it when it has no other
    /// booking. Accounts with a password were signed up for and are kept.
    ///
    /// # Returns
    /// - `Ok(false)` - No booking with that id and session
    /// - `Err(AppError::Conflict)` - The booking is no longer `void`
    pub async fn delete_temp(&self, id: i32, session_id: &str) -> Result<bool, AppError> {
        let booking_repo = BookingRepository::new(self.db);
        let Some(booking) = booking_repo.get_by_id(id).await? else {
            return Ok(false);
        };

        if booking.session_id.as_deref() != Some(session_id) {
            return Ok(false);
        }

        if booking.status != BookingStatus::Void {
            return Err(AppError::Conflict(format!(
                "Booking {} is not a pending checkout",
                id
            )));
        }

        booking_repo.delete_many(vec![id]).await?;

        let user_repo = UserRepository::new(self.db);
        if let Some(driver) = user_repo.find_by_id(booking.driver_id).await? {
            if driver.is_checkout_guest() && !booking_repo.user_has_bookings(driver.id).await? {
                user_repo.delete_many(vec![driver.id]).await?;
                tracing::info!("Deleted guest account {} with its checkout", driver.id);
            }
        }

        Ok(true)
    }

    /// Gets a booking with the names of everything it refers to.
    ///
    /// Visible to admins, to the supplier owning it and to its driver.
    pub async fn get(&self, caller: &User, id: i32) -> Result<Option<BookingDetail>, AppError> {
        let Some(detail) = BookingRepository::new(self.db).get_detail(id).await? else {
            return Ok(None);
        };

        let booking = &detail.booking;
        if !caller.is_admin() && caller.id != booking.supplier_id && caller.id != booking.driver_id {
            return Err(AuthError::AccessDenied(
                caller.id,
                format!("booking {} belongs to someone else", id),
            )
            .into());
        }

        Ok(Some(detail))
    }

    /// Searches bookings visible to the caller, newest first.
    ///
    /// Suppliers are limited to their own bookings and customers to the bookings
    /// they drive.
    pub async fn search(
        &self,
        caller: &User,
        mut params: BookingSearchParams,
    ) -> Result<PaginatedBookings, AppError> {
        if caller.is_supplier() {
            params.suppliers = vec![caller.id];
        } else if !caller.is_admin() {
            params.driver_id = Some(caller.id);
        }

        let (results, total) = BookingRepository::new(self.db).search(&params).await?;

        Ok(PaginatedBookings {
            results,
            total,
            page: params.page,
            per_page: params.per_page,
            total_pages: page_count(total, params.per_page),
        })
    }

    pub async fn has_bookings(&self, driver_id: i32) -> Result<bool, AppError> {
        Ok(BookingRepository::new(self.db)
            .user_has_bookings(driver_id)
            .await?)
    }

    /// Records a cancellation request from the driver and tells the supplier and admins.
    ///
    /// # Returns
    /// - `Ok(false)` - No booking with that id
    /// - `Err(AuthError::AccessDenied)` - The caller does not drive the booking
    /// - `Err(AppError::BadRequest)` - Cancelled already, or cancellation not offered
    pub async fn cancel_request(&self, caller: &User, id: i32) -> Result<bool, AppError> {
        let booking_repo = BookingRepository::new(self.db);
        let Some(booking) = booking_repo.get_by_id(id).await? else {
            return Ok(false);
        };

        if booking.driver_id != caller.id {
            return Err(AuthError::AccessDenied(
                caller.id,
                format!("booking {} belongs to another driver", id),
            )
            .into());
        }

        if booking.status == BookingStatus::Cancelled {
            return Err(AppError::BadRequest(format!(
                "Booking {} is already cancelled",
                id
            )));
        }

        let cancellable = CarRepository::new(self.db)
            .get_by_id(booking.car_id)
            .await?
            .is_some_and(|car| car.allows_cancellation());
        if !cancellable {
            return Err(AppError::BadRequest(format!(
                "Booking {} cannot be cancelled",
                id
            )));
        }

        booking_repo.set_cancel_request(id).await?;

        let message = format!(
            "{} requested the cancellation of booking {}.",
            caller.full_name, id
        );
        if let Some(supplier) = UserRepository::new(self.db)
            .find_by_id(booking.supplier_id)
            .await?
        {
            self.notify(&supplier, "Cancellation request", message.clone(), id)
                .await;
        }
        self.notify_admins("Cancellation request", &message, id).await;

        Ok(true)
    }

    pub async fn id_by_session(&self, session_id: &str) -> Result<Option<i32>, AppError> {
        Ok(BookingRepository::new(self.db)
            .find_by_session_id(session_id)
            .await?
            .map(|b| b.id))
    }

    async fn notify_new_booking(&self, booking: &Booking, driver: &User, supplier: &User) {
        let message = format!(
            "{} booked car {} from {} to {} (booking {}).",
            driver.full_name,
            booking.car_id,
            booking.from.format("%Y-%m-%d %H:%M"),
            booking.to.format("%Y-%m-%d %H:%M"),
            booking.id
        );

        self.notify(supplier, "New booking", message.clone(), booking.id)
            .await;
        self.notify_admins("New booking", &message, booking.id).await;
    }

    async fn notify_status_change(&self, booking: &Booking) {
        let driver = match UserRepository::new(self.db).find_by_id(booking.driver_id).await {
            Ok(Some(driver)) => driver,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!("Failed to load driver of booking {}: {}", booking.id, e);
                return;
            }
        };

        self.notify(
            &driver,
            "Booking updated",
            format!("The status of your booking {} is now {}.", booking.id, booking.status),
            booking.id,
        )
        .await;
    }

    async fn notify(&self, user: &User, subject: &str, message: String, booking_id: i32) {
        if let Err(e) = NotificationService::new(self.db, self.mailer, self.push)
            .notify(user, subject, message, Some(booking_id))
            .await
        {
            tracing::warn!("Failed to notify user {} of booking {}: {}", user.id, booking_id, e);
        }
    }

    async fn notify_admins(&self, subject: &str, message: &str, booking_id: i32) {
        if let Err(e) = NotificationService::new(self.db, self.mailer, self.push)
            .notify_admins(subject, message, Some(booking_id))
            .await
        {
            tracing::warn!("Failed to notify admins of booking {}: {}", booking_id, e);
        }
    }
}

fn check_period(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<(), AppError> {
    if from >= to {
        return Err(AppError::BadRequest(
            "Pickup must be before drop-off".to_string(),
        ));
    }
    Ok(())
}

/// Rejects options the car does not offer.
fn check_options(car: &Car, options: &BookingOptions) -> Result<(), AppError> {
    let offered = [
        ("cancellation", options.cancellation, car.cancellation),
        ("amendments", options.amendments, car.amendments),
        ("theft protection", options.theft_protection, car.theft_protection),
        (
            "collision damage waiver",
            options.collision_damage_waiver,
            car.collision_damage_waiver,
        ),
        ("full insurance", options.full_insurance, car.full_insurance),
        ("additional driver", options.additional_driver, car.additional_driver),
    ];

    match offered
        .iter()
        .find(|(_, selected, price)| *selected && *price < 0.0)
    {
        Some((name, _, _)) => Err(AppError::BadRequest(format!(
            "Car {} does not offer {}",
            car.id, name
        ))),
        None => Ok(()),
    }
}

/// Normalizes an additional driver and checks they may drive the car.
fn check_additional_driver(
    car: &Car,
    params: AdditionalDriverParams,
    from: DateTime<Utc>,
) -> Result<AdditionalDriverParams, AppError> {
    let params = AdditionalDriverParams {
        full_name: validate_name("Additional driver name", &params.full_name)?,
        email: validate_email(&params.email)?,
        ..params
    };

    if age_at(params.birth_date, from) < car.minimum_age {
        return Err(AppError::BadRequest(format!(
            "The additional driver must be at least {} years old",
            car.minimum_age
        )));
    }

    Ok(params)
}

fn price_of(car: &Car, from: DateTime<Utc>, to: DateTime<Utc>, options: &BookingOptions) -> f64 {
    pricing::total_price(
        &PriceSheet::from_car(car),
        from,
        to,
        options,
        car.supplier.price_change_rate,
    )
}
