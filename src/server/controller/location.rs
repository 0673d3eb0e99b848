use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, ExistsDto, FilenameDto, ListQuery, ValidateNameDto},
        location::{CreateLocationDto, LocationDto, PaginatedLocationsDto, UpdateLocationDto},
    },
    server::{
        controller::read_upload,
        error::{auth::AuthError, AppError},
        middleware::auth::{AuthGuard, Permission},
        model::{
            location::{CreateLocationParams, Location, UpdateLocationParams},
            user::User,
        },
        service::location::LocationService,
        state::AppState,
    },
};

/// Tag for grouping location endpoints in OpenAPI documentation
pub static LOCATION_TAG: &str = "location";

/// Create a location with its parking spots.
///
/// A temporary image named in the payload is moved into place. Suppliers become the
/// owner of the locations they create.
#[utoipa::path(
    post,
    path = "/api/locations",
    tag = LOCATION_TAG,
    request_body = CreateLocationDto,
    responses(
        (status = 201, description = "Successfully created location", body = LocationDto),
        (status = 400, description = "Invalid name or unknown country", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a supplier or admin", body = ErrorDto),
        (status = 409, description = "Location name already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_location(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateLocationDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let mut params = CreateLocationParams::from_dto(payload);
    if !user.is_admin() {
        params.supplier_id = Some(user.id);
    }

    let location = LocationService::new(&state.db, &state.storage)
        .create(params)
        .await?;

    Ok((StatusCode::CREATED, Json(location.into_dto())))
}

/// Replace a location's fields; the parking spot list replaces the stored one.
#[utoipa::path(
    put,
    path = "/api/locations/{id}",
    tag = LOCATION_TAG,
    params(
        ("id" = i32, Path, description = "Location ID")
    ),
    request_body = UpdateLocationDto,
    responses(
        (status = 200, description = "Successfully updated location", body = LocationDto),
        (status = 400, description = "Invalid name or unknown country", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Location belongs to another supplier", body = ErrorDto),
        (status = 404, description = "Location not found", body = ErrorDto),
        (status = 409, description = "Location name already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_location(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateLocationDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let service = LocationService::new(&state.db, &state.storage);
    ensure_location_owner(&service, &user, id).await?;

    match service
        .update(UpdateLocationParams::from_dto(id, payload))
        .await?
    {
        Some(location) => Ok((StatusCode::OK, Json(location.into_dto()))),
        None => Err(AppError::NotFound(format!("Location {} not found", id))),
    }
}

/// Delete a location and its image. Refused while cars or bookings use it.
#[utoipa::path(
    delete,
    path = "/api/locations/{id}",
    tag = LOCATION_TAG,
    params(
        ("id" = i32, Path, description = "Location ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted location"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Location belongs to another supplier", body = ErrorDto),
        (status = 404, description = "Location not found", body = ErrorDto),
        (status = 409, description = "Location is in use", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_location(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let service = LocationService::new(&state.db, &state.storage);
    ensure_location_owner(&service, &user, id).await?;

    if service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Location {} not found", id)))
    }
}

#[utoipa::path(
    get,
    path = "/api/locations/{id}",
    tag = LOCATION_TAG,
    params(
        ("id" = i32, Path, description = "Location ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved location", body = LocationDto),
        (status = 404, description = "Location not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    match LocationService::new(&state.db, &state.storage).get(id).await? {
        Some(location) => Ok((StatusCode::OK, Json(location.into_dto()))),
        None => Err(AppError::NotFound(format!("Location {} not found", id))),
    }
}

/// Paginated locations ordered by name, with their country name.
///
/// Public: the storefront searches pickup locations with it.
#[utoipa::path(
    get,
    path = "/api/locations",
    tag = LOCATION_TAG,
    params(ListQuery),
    responses(
        (status = 200, description = "Successfully retrieved locations", body = PaginatedLocationsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_locations(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let locations = LocationService::new(&state.db, &state.storage)
        .get_paginated(params.keyword.as_deref(), params.page, params.entries)
        .await?;

    Ok((StatusCode::OK, Json(locations.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/locations/{id}/in-use",
    tag = LOCATION_TAG,
    params(
        ("id" = i32, Path, description = "Location ID")
    ),
    responses(
        (status = 200, description = "Whether cars or bookings use the location", body = ExistsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn location_in_use(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let exists = LocationService::new(&state.db, &state.storage)
        .in_use(id)
        .await?;

    Ok((StatusCode::OK, Json(ExistsDto { exists })))
}

/// Locations that have coordinates, for the storefront map.
#[utoipa::path(
    get,
    path = "/api/locations/with-position",
    tag = LOCATION_TAG,
    responses(
        (status = 200, description = "Locations with coordinates", body = Vec<LocationDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_locations_with_position(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let locations = LocationService::new(&state.db, &state.storage)
        .get_with_position()
        .await?;

    let dtos: Vec<LocationDto> = locations.into_iter().map(Location::into_dto).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

#[utoipa::path(
    post,
    path = "/api/locations/validate",
    tag = LOCATION_TAG,
    request_body = ValidateNameDto,
    responses(
        (status = 200, description = "Whether the name is taken", body = ExistsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn validate_location_name(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ValidateNameDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let available = LocationService::new(&state.db, &state.storage)
        .name_available(&payload.name)
        .await?;

    Ok((StatusCode::OK, Json(ExistsDto { exists: !available })))
}

/// Store an image before its location exists.
///
/// Expects a multipart body with a `file` field. The returned name goes into the
/// `image` field of the creation payload.
#[utoipa::path(
    post,
    path = "/api/locations/images/temp",
    tag = LOCATION_TAG,
    responses(
        (status = 201, description = "Temporary image stored", body = FilenameDto),
        (status = 400, description = "Missing or empty file", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_temp_location_image(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let (file_name, bytes) = read_upload(multipart).await?;
    let filename = LocationService::new(&state.db, &state.storage)
        .upload_temp_image(&file_name, &bytes)
        .await?;

    Ok((StatusCode::CREATED, Json(FilenameDto { filename })))
}

#[utoipa::path(
    delete,
    path = "/api/locations/images/temp/{name}",
    tag = LOCATION_TAG,
    params(
        ("name" = String, Path, description = "Temporary file name")
    ),
    responses(
        (status = 204, description = "Temporary image deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_temp_location_image(
    State(state): State<AppState>,
    session: Session,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    LocationService::new(&state.db, &state.storage)
        .delete_temp_image(&name)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Replace the image of a location. Expects a multipart body with a `file` field.
#[utoipa::path(
    put,
    path = "/api/locations/{id}/image",
    tag = LOCATION_TAG,
    params(
        ("id" = i32, Path, description = "Location ID")
    ),
    responses(
        (status = 200, description = "Image replaced", body = FilenameDto),
        (status = 400, description = "Missing or empty file", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Location belongs to another supplier", body = ErrorDto),
        (status = 404, description = "Location not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_location_image(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let service = LocationService::new(&state.db, &state.storage);
    ensure_location_owner(&service, &user, id).await?;

    let (file_name, bytes) = read_upload(multipart).await?;
    match service.update_image(id, &file_name, &bytes).await? {
        Some(filename) => Ok((StatusCode::OK, Json(FilenameDto { filename }))),
        None => Err(AppError::NotFound(format!("Location {} not found", id))),
    }
}

#[utoipa::path(
    delete,
    path = "/api/locations/{id}/image",
    tag = LOCATION_TAG,
    params(
        ("id" = i32, Path, description = "Location ID")
    ),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Location belongs to another supplier", body = ErrorDto),
        (status = 404, description = "Location not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_location_image(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let service = LocationService::new(&state.db, &state.storage);
    ensure_location_owner(&service, &user, id).await?;

    if service.delete_image(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Location {} not found", id)))
    }
}

async fn ensure_location_owner(
    service: &LocationService<'_>,
    user: &User,
    id: i32,
) -> Result<(), AppError> {
    let Some(location) = service.get(id).await? else {
        return Err(AppError::NotFound(format!("Location {} not found", id)));
    };

    if !user.is_admin() && location.supplier_id != Some(user.id) {
        return Err(AuthError::AccessDenied(
            user.id,
            format!("location {} is managed by someone else", id),
        )
        .into());
    }

    Ok(())
}
