use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, ExistsDto, IdsDto},
        booking::{
            BookingDetailDto, BookingIdDto, BookingPayloadDto, BookingSearchDto, CheckoutDto,
            CheckoutResultDto, ConfirmCheckoutDto, PaginatedBookingsDto, PriceDto, PriceQuoteDto,
            UpdateStatusDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            booking::{
                BookingOptions, BookingPayload, BookingSearchParams, CheckoutParams,
            },
            user::User,
        },
        service::booking::BookingService,
        state::AppState,
    },
};

/// Tag for grouping booking endpoints in OpenAPI documentation
pub static BOOKING_TAG: &str = "booking";

fn booking_service(state: &AppState) -> BookingService<'_> {
    BookingService::new(&state.db, &state.config, &state.mailer, &state.push)
}

async fn booking_detail(
    service: &BookingService<'_>,
    caller: &User,
    id: i32,
) -> Result<BookingDetailDto, AppError> {
    match service.get(caller, id).await? {
        Some(detail) => Ok(detail.into_dto()),
        None => Err(AppError::NotFound(format!("Booking {} not found", id))),
    }
}

/// Create a booking from the back-office.
///
/// The price is computed from the car's pricing when the payload does not carry one.
/// The driver and the supplier are notified.
///
/// # Access Control
/// - `Admin` - Any car
/// - `Supplier` - Only their own cars
///
/// # Returns
/// - `201 Created` - The booking with the names of what it references
/// - `400 Bad Request` - Unknown car, driver or location, invalid period or options
/// - `403 Forbidden` - The car belongs to another supplier
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = BOOKING_TAG,
    request_body = BookingPayloadDto,
    responses(
        (status = 201, description = "Successfully created booking", body = BookingDetailDto),
        (status = 400, description = "Invalid booking", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Car belongs to another supplier", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_booking(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BookingPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let service = booking_service(&state);
    let booking = service
        .create(&user, BookingPayload::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(booking_detail(&service, &user, booking.id).await?),
    ))
}

/// Replace the fields of a booking.
///
/// # Access Control
/// - `Admin` - Any booking
/// - `Supplier` - Only bookings of their cars
#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    tag = BOOKING_TAG,
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    request_body = BookingPayloadDto,
    responses(
        (status = 200, description = "Successfully updated booking", body = BookingDetailDto),
        (status = 400, description = "Invalid booking", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Booking belongs to another supplier", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_booking(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<BookingPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let service = booking_service(&state);
    if service
        .update(&user, id, BookingPayload::from_dto(payload))
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!("Booking {} not found", id)));
    }

    Ok((StatusCode::OK, Json(booking_detail(&service, &user, id).await?)))
}

/// Set the status of several bookings at once.
///
/// Bookings of other suppliers are skipped. Drivers whose booking changed status
/// are notified.
///
/// # Returns
/// - `204 No Content` - Statuses updated
#[utoipa::path(
    post,
    path = "/api/bookings/status",
    tag = BOOKING_TAG,
    request_body = UpdateStatusDto,
    responses(
        (status = 204, description = "Statuses updated"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a supplier or admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_booking_status(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UpdateStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    booking_service(&state)
        .update_status(&user, payload.ids, payload.status)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete several bookings with their additional drivers.
///
/// Bookings of other suppliers are skipped.
#[utoipa::path(
    post,
    path = "/api/bookings/delete",
    tag = BOOKING_TAG,
    request_body = IdsDto,
    responses(
        (status = 204, description = "Bookings deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a supplier or admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_bookings(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<IdsDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    booking_service(&state)
        .delete_many(&user, payload.ids)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Drop an unpaid checkout, and its guest account, when the payment was abandoned.
///
/// The checkout session id acts as the credential.
///
/// # Access Control
/// - Public
#[utoipa::path(
    delete,
    path = "/api/bookings/{id}/temp/{session_id}",
    tag = BOOKING_TAG,
    params(
        ("id" = i32, Path, description = "Booking ID"),
        ("session_id" = String, Path, description = "Checkout session ID")
    ),
    responses(
        (status = 204, description = "Checkout dropped"),
        (status = 404, description = "No checkout for that booking and session", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_temp_booking(
    State(state): State<AppState>,
    Path((id, session_id)): Path<(i32, String)>,
) -> Result<impl IntoResponse, AppError> {
    if booking_service(&state).delete_temp(id, &session_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "No checkout for booking {} and session {}",
            id, session_id
        )))
    }
}

/// Get a booking with the names of what it references.
///
/// # Access Control
/// - `Admin` - Any booking
/// - `Supplier` - Bookings of their cars
/// - Customers - Bookings they drive
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = BOOKING_TAG,
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved booking", body = BookingDetailDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not a party to the booking", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_booking(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((
        StatusCode::OK,
        Json(booking_detail(&booking_service(&state), &user, id).await?),
    ))
}

/// Search bookings, newest first.
///
/// Suppliers only see bookings of their cars and customers only their own.
#[utoipa::path(
    post,
    path = "/api/bookings/search",
    tag = BOOKING_TAG,
    request_body = BookingSearchDto,
    responses(
        (status = 200, description = "Matching bookings", body = PaginatedBookingsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_bookings(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BookingSearchDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let bookings = booking_service(&state)
        .search(&user, BookingSearchParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(bookings.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/bookings/has-bookings/{driver_id}",
    tag = BOOKING_TAG,
    params(
        ("driver_id" = i32, Path, description = "Driver user ID")
    ),
    responses(
        (status = 200, description = "Whether the user drives any booking", body = ExistsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a supplier or admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn has_bookings(
    State(state): State<AppState>,
    session: Session,
    Path(driver_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let exists = booking_service(&state).has_bookings(driver_id).await?;

    Ok((StatusCode::OK, Json(ExistsDto { exists })))
}

/// Ask the supplier to cancel a booking.
///
/// Only the driver can ask, and only when the car allows cancellation.
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/cancel-request",
    tag = BOOKING_TAG,
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 204, description = "Cancellation requested"),
        (status = 400, description = "Cancellation not offered", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the driver of the booking", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_booking_request(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    if booking_service(&state).cancel_request(&user, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Booking {} not found", id)))
    }
}

/// Book a car from the storefront.
///
/// Signed-in customers book for themselves. Visitors send driver details and get an
/// unverified account that expires with the checkout unless the payment is confirmed.
/// Bookings paid later are reserved at once; others wait for payment confirmation
/// under the returned `session_id`.
///
/// # Access Control
/// - Public, with an optional session
///
/// # Returns
/// - `201 Created` - Booking id, status, price and amount due now
/// - `400 Bad Request` - Car, period, driver or options not acceptable
/// - `404 Not Found` - Unknown car
/// - `409 Conflict` - Car already booked, or the guest email belongs to an account
#[utoipa::path(
    post,
    path = "/api/checkout",
    tag = BOOKING_TAG,
    request_body = CheckoutDto,
    responses(
        (status = 201, description = "Checkout created", body = CheckoutResultDto),
        (status = 400, description = "Invalid checkout", body = ErrorDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 409, description = "Car unavailable or email taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CheckoutDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).optional().await?;

    let result = booking_service(&state)
        .checkout(user.as_ref(), CheckoutParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(result.into_dto())))
}

/// Confirm the payment of a checkout.
///
/// The booking becomes `deposit` or `paid`, stops expiring, and the guest account
/// created with it is kept.
#[utoipa::path(
    post,
    path = "/api/checkout/{session_id}/confirm",
    tag = BOOKING_TAG,
    params(
        ("session_id" = String, Path, description = "Checkout session ID")
    ),
    request_body = ConfirmCheckoutDto,
    responses(
        (status = 200, description = "Checkout confirmed", body = BookingIdDto),
        (status = 404, description = "No booking for that session", body = ErrorDto),
        (status = 409, description = "Booking already confirmed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn confirm_checkout(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(payload): Json<ConfirmCheckoutDto>,
) -> Result<impl IntoResponse, AppError> {
    let booking = booking_service(&state)
        .confirm(&session_id, payload.payment_intent_id, payload.customer_id)
        .await?;

    Ok((StatusCode::OK, Json(BookingIdDto { booking_id: booking.id })))
}

#[utoipa::path(
    get,
    path = "/api/checkout/{session_id}",
    tag = BOOKING_TAG,
    params(
        ("session_id" = String, Path, description = "Checkout session ID")
    ),
    responses(
        (status = 200, description = "Booking of the checkout session", body = BookingIdDto),
        (status = 404, description = "No booking for that session", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_booking_id_by_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    match booking_service(&state).id_by_session(&session_id).await? {
        Some(booking_id) => Ok((StatusCode::OK, Json(BookingIdDto { booking_id }))),
        None => Err(AppError::NotFound(format!(
            "No booking for session {}",
            session_id
        ))),
    }
}

/// Price a rental before booking it.
///
/// # Returns
/// - `200 OK` - Number of days and total price, supplier rate included
/// - `400 Bad Request` - Invalid period or option not offered by the car
/// - `404 Not Found` - Unknown car
#[utoipa::path(
    post,
    path = "/api/checkout/price",
    tag = BOOKING_TAG,
    request_body = PriceQuoteDto,
    responses(
        (status = 200, description = "Price of the rental", body = PriceDto),
        (status = 400, description = "Invalid period or options", body = ErrorDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn quote_price(
    State(state): State<AppState>,
    Json(payload): Json<PriceQuoteDto>,
) -> Result<impl IntoResponse, AppError> {
    let (days, price) = booking_service(&state)
        .quote(
            payload.car_id,
            payload.from,
            payload.to,
            BookingOptions::from_dto(payload.options),
        )
        .await?;

    Ok((StatusCode::OK, Json(PriceDto { days, price })))
}
