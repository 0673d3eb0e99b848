use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, ExistsDto, FilenameDto},
        car::{
            BookingCarsDto, CarDto, CarPayloadDto, CarSearchDto, FrontendCarSearchDto,
            PaginatedCarsDto,
        },
    },
    server::{
        controller::read_upload,
        error::AppError,
        middleware::auth::{ensure_owner, AuthGuard, Permission},
        model::{
            car::{Car, CarFilter, CarParams},
            user::User,
        },
        service::car::CarService,
        state::AppState,
    },
};

/// Tag for grouping car endpoints in OpenAPI documentation
pub static CAR_TAG: &str = "car";

fn car_service(state: &AppState) -> CarService<'_> {
    CarService::new(
        &state.db,
        &state.config,
        &state.mailer,
        &state.push,
        &state.storage,
    )
}

/// Create a car.
///
/// The car is owned by the supplier named in the payload; suppliers always own the
/// cars they create. A temporary image named in the payload is moved into place.
///
/// # Access Control
/// - `Supplier` - Suppliers and admins
///
/// # Returns
/// - `201 Created` - Successfully created car
/// - `400 Bad Request` - Invalid fields, unknown supplier or locations
/// - `409 Conflict` - The supplier reached its car limit
#[utoipa::path(
    post,
    path = "/api/cars",
    tag = CAR_TAG,
    request_body = CarPayloadDto,
    responses(
        (status = 201, description = "Successfully created car", body = CarDto),
        (status = 400, description = "Invalid car", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a supplier or admin", body = ErrorDto),
        (status = 409, description = "Supplier car limit reached", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_car(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CarPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let mut params = CarParams::from_dto(payload);
    if !user.is_admin() {
        params.supplier_id = user.id;
    }

    let car = car_service(&state).create(params).await?;

    Ok((StatusCode::CREATED, Json(car.into_dto())))
}

/// Update a car.
///
/// # Access Control
/// - `Admin` - Any car
/// - `Supplier` - Only their own cars, which stay theirs
#[utoipa::path(
    put,
    path = "/api/cars/{id}",
    tag = CAR_TAG,
    params(
        ("id" = i32, Path, description = "Car ID")
    ),
    request_body = CarPayloadDto,
    responses(
        (status = 200, description = "Successfully updated car", body = CarDto),
        (status = 400, description = "Invalid car", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Car belongs to another supplier", body = ErrorDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_car(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<CarPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let service = car_service(&state);
    let car = find_owned_car(&service, &user, id).await?;

    let mut params = CarParams::from_dto(payload);
    if !user.is_admin() {
        params.supplier_id = car.supplier.id;
    }

    match service.update(id, params).await? {
        Some(car) => Ok((StatusCode::OK, Json(car.into_dto()))),
        None => Err(AppError::NotFound(format!("Car {} not found", id))),
    }
}

/// Delete a car with its bookings and image.
///
/// # Access Control
/// - `Admin` - Any car
/// - `Supplier` - Only their own cars
#[utoipa::path(
    delete,
    path = "/api/cars/{id}",
    tag = CAR_TAG,
    params(
        ("id" = i32, Path, description = "Car ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted car"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Car belongs to another supplier", body = ErrorDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_car(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let service = car_service(&state);
    find_owned_car(&service, &user, id).await?;

    if service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Car {} not found", id)))
    }
}

#[utoipa::path(
    get,
    path = "/api/cars/{id}",
    tag = CAR_TAG,
    params(
        ("id" = i32, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved car", body = CarDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    match car_service(&state).get(id).await? {
        Some(car) => Ok((StatusCode::OK, Json(car.into_dto()))),
        None => Err(AppError::NotFound(format!("Car {} not found", id))),
    }
}

/// Back-office car search, newest first.
///
/// Suppliers only ever see their own cars whatever supplier filter they send.
///
/// # Access Control
/// - `Supplier` - Suppliers and admins
#[utoipa::path(
    post,
    path = "/api/cars/search",
    tag = CAR_TAG,
    request_body = CarSearchDto,
    responses(
        (status = 200, description = "Matching cars", body = PaginatedCarsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a supplier or admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_cars(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CarSearchDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let mut filter = CarFilter::from_dto(payload.filter);
    if !user.is_admin() {
        filter.suppliers = vec![user.id];
    }

    let cars = car_service(&state)
        .search(&filter, payload.page, payload.entries)
        .await?;

    Ok((StatusCode::OK, Json(cars.into_dto())))
}

/// Available cars a supplier offers at a pickup location, for the booking form.
///
/// # Access Control
/// - `Supplier` - Suppliers are limited to their own fleet
#[utoipa::path(
    post,
    path = "/api/cars/booking",
    tag = CAR_TAG,
    request_body = BookingCarsDto,
    responses(
        (status = 200, description = "Cars available for booking", body = PaginatedCarsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a supplier or admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_booking_cars(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BookingCarsDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let supplier_id = if user.is_admin() {
        payload.supplier_id
    } else {
        user.id
    };

    let cars = car_service(&state)
        .get_booking_cars(
            supplier_id,
            payload.pickup_location_id,
            payload.keyword.as_deref(),
            payload.page,
            payload.entries,
        )
        .await?;

    Ok((StatusCode::OK, Json(cars.into_dto())))
}

/// Storefront search for cars rentable at a pickup location over a date range.
///
/// Cars that are unavailable, of suppliers requiring a longer rental, or already
/// booked over the window are excluded.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Matching cars
/// - `400 Bad Request` - `from` is not before `to`
#[utoipa::path(
    post,
    path = "/api/cars/frontend",
    tag = CAR_TAG,
    request_body = FrontendCarSearchDto,
    responses(
        (status = 200, description = "Rentable cars", body = PaginatedCarsDto),
        (status = 400, description = "Invalid date range", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_frontend_cars(
    State(state): State<AppState>,
    Json(payload): Json<FrontendCarSearchDto>,
) -> Result<impl IntoResponse, AppError> {
    let filter = CarFilter::from_dto(payload.filter);
    let cars = car_service(&state)
        .get_frontend_cars(
            &filter,
            payload.pickup_location_id,
            payload.from,
            payload.to,
            payload.page,
            payload.entries,
        )
        .await?;

    Ok((StatusCode::OK, Json(cars.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/cars/{id}/in-use",
    tag = CAR_TAG,
    params(
        ("id" = i32, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Whether bookings refer to the car", body = ExistsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn car_in_use(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let exists = car_service(&state).in_use(id).await?;

    Ok((StatusCode::OK, Json(ExistsDto { exists })))
}

/// Store an image before its car exists. Expects a multipart `file` field.
#[utoipa::path(
    post,
    path = "/api/cars/images/temp",
    tag = CAR_TAG,
    responses(
        (status = 201, description = "Temporary image stored", body = FilenameDto),
        (status = 400, description = "Missing or empty file", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_temp_car_image(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let (file_name, bytes) = read_upload(multipart).await?;
    let filename = car_service(&state)
        .upload_temp_image(&file_name, &bytes)
        .await?;

    Ok((StatusCode::CREATED, Json(FilenameDto { filename })))
}

#[utoipa::path(
    delete,
    path = "/api/cars/images/temp/{name}",
    tag = CAR_TAG,
    params(
        ("name" = String, Path, description = "Temporary file name")
    ),
    responses(
        (status = 204, description = "Temporary image deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_temp_car_image(
    State(state): State<AppState>,
    session: Session,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    car_service(&state).delete_temp_image(&name).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Replace the image of a car. Expects a multipart `file` field.
#[utoipa::path(
    put,
    path = "/api/cars/{id}/image",
    tag = CAR_TAG,
    params(
        ("id" = i32, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Image replaced", body = FilenameDto),
        (status = 400, description = "Missing or empty file", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Car belongs to another supplier", body = ErrorDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_car_image(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let service = car_service(&state);
    find_owned_car(&service, &user, id).await?;

    let (file_name, bytes) = read_upload(multipart).await?;
    match service.update_image(id, &file_name, &bytes).await? {
        Some(filename) => Ok((StatusCode::OK, Json(FilenameDto { filename }))),
        None => Err(AppError::NotFound(format!("Car {} not found", id))),
    }
}

#[utoipa::path(
    delete,
    path = "/api/cars/{id}/image",
    tag = CAR_TAG,
    params(
        ("id" = i32, Path, description = "Car ID")
    ),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Car belongs to another supplier", body = ErrorDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_car_image(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let service = car_service(&state);
    find_owned_car(&service, &user, id).await?;

    if service.delete_image(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Car {} not found", id)))
    }
}

async fn find_owned_car(service: &CarService<'_>, user: &User, id: i32) -> Result<Car, AppError> {
    let Some(car) = service.get(id).await? else {
        return Err(AppError::NotFound(format!("Car {} not found", id)));
    };

    ensure_owner(user, car.supplier.id)?;

    Ok(car)
}
