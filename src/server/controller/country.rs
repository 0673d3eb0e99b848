use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, ExistsDto, ListQuery, ValidateNameDto},
        country::{
            CountryDto, CountryWithLocationsDto, CreateCountryDto, PaginatedCountriesDto,
            UpdateCountryDto,
        },
    },
    server::{
        error::{auth::AuthError, AppError},
        middleware::auth::{AuthGuard, Permission},
        model::{
            country::{Country, CountryWithLocations, CreateCountryParams},
            user::User,
        },
        service::country::CountryService,
        state::AppState,
    },
};

/// Tag for grouping country endpoints in OpenAPI documentation
pub static COUNTRY_TAG: &str = "country";

/// Create a new country.
///
/// Country names are unique. A supplier creating a country becomes its owner.
///
/// # Access Control
/// - `Supplier` - Suppliers and admins can create countries
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Country name and optional owning supplier
///
/// # Returns
/// - `201 Created` - Successfully created country
/// - `400 Bad Request` - Empty name
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is a customer
/// - `409 Conflict` - A country with that name exists
#[utoipa::path(
    post,
    path = "/api/countries",
    tag = COUNTRY_TAG,
    request_body = CreateCountryDto,
    responses(
        (status = 201, description = "Successfully created country", body = CountryDto),
        (status = 400, description = "Invalid country name", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a supplier or admin", body = ErrorDto),
        (status = 409, description = "Country name already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_country(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateCountryDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let mut params = CreateCountryParams::from_dto(payload);
    if !user.is_admin() {
        params.supplier_id = Some(user.id);
    }

    let country = CountryService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(country.into_dto())))
}

/// Rename a country.
///
/// # Access Control
/// - `Admin` - Any country
/// - `Supplier` - Only countries the supplier created
///
/// # Returns
/// - `200 OK` - Updated country
/// - `404 Not Found` - No country with that id
/// - `409 Conflict` - Another country has that name
#[utoipa::path(
    put,
    path = "/api/countries/{id}",
    tag = COUNTRY_TAG,
    params(
        ("id" = i32, Path, description = "Country ID")
    ),
    request_body = UpdateCountryDto,
    responses(
        (status = 200, description = "Successfully updated country", body = CountryDto),
        (status = 400, description = "Invalid country name", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Country belongs to another supplier", body = ErrorDto),
        (status = 404, description = "Country not found", body = ErrorDto),
        (status = 409, description = "Country name already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_country(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCountryDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let service = CountryService::new(&state.db);
    ensure_country_owner(&service, &user, id).await?;

    match service.update(id, &payload.name).await? {
        Some(country) => Ok((StatusCode::OK, Json(country.into_dto()))),
        None => Err(AppError::NotFound(format!("Country {} not found", id))),
    }
}

/// Delete a country.
///
/// Refused while locations still belong to the country.
///
/// # Access Control
/// - `Admin` - Any country
/// - `Supplier` - Only countries the supplier created
///
/// # Returns
/// - `204 No Content` - Country deleted
/// - `404 Not Found` - No country with that id
/// - `409 Conflict` - Locations still belong to the country
#[utoipa::path(
    delete,
    path = "/api/countries/{id}",
    tag = COUNTRY_TAG,
    params(
        ("id" = i32, Path, description = "Country ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted country"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Country belongs to another supplier", body = ErrorDto),
        (status = 404, description = "Country not found", body = ErrorDto),
        (status = 409, description = "Country still has locations", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_country(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let service = CountryService::new(&state.db);
    ensure_country_owner(&service, &user, id).await?;

    if service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Country {} not found", id)))
    }
}

/// Get a country by ID.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Country details
/// - `404 Not Found` - No country with that id
#[utoipa::path(
    get,
    path = "/api/countries/{id}",
    tag = COUNTRY_TAG,
    params(
        ("id" = i32, Path, description = "Country ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved country", body = CountryDto),
        (status = 404, description = "Country not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_country(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    match CountryService::new(&state.db).get(id).await? {
        Some(country) => Ok((StatusCode::OK, Json(country.into_dto()))),
        None => Err(AppError::NotFound(format!("Country {} not found", id))),
    }
}

/// Get paginated countries ordered by name.
///
/// # Access Control
/// - `Supplier` - Suppliers and admins
///
/// # Arguments
/// - `params` - Page, entries per page and optional keyword matched against the name
///
/// # Returns
/// - `200 OK` - Paginated list of countries
#[utoipa::path(
    get,
    path = "/api/countries",
    tag = COUNTRY_TAG,
    params(ListQuery),
    responses(
        (status = 200, description = "Successfully retrieved countries", body = PaginatedCountriesDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a supplier or admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_countries(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let countries = CountryService::new(&state.db)
        .get_paginated(params.keyword.as_deref(), params.page, params.entries)
        .await?;

    Ok((StatusCode::OK, Json(countries.into_dto())))
}

/// Check whether locations refer to a country.
///
/// # Access Control
/// - `Supplier` - Suppliers and admins
#[utoipa::path(
    get,
    path = "/api/countries/{id}/in-use",
    tag = COUNTRY_TAG,
    params(
        ("id" = i32, Path, description = "Country ID")
    ),
    responses(
        (status = 200, description = "Whether the country is in use", body = ExistsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn country_in_use(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let exists = CountryService::new(&state.db).in_use(id).await?;

    Ok((StatusCode::OK, Json(ExistsDto { exists })))
}

/// Get every country that has locations, with those locations.
///
/// Used by the storefront to fill the pickup location picker.
///
/// # Access Control
/// - Public
#[utoipa::path(
    get,
    path = "/api/countries/with-locations",
    tag = COUNTRY_TAG,
    responses(
        (status = 200, description = "Countries with their locations", body = Vec<CountryWithLocationsDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_countries_with_locations(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let countries = CountryService::new(&state.db).get_with_locations().await?;

    let dtos: Vec<CountryWithLocationsDto> = countries
        .into_iter()
        .map(CountryWithLocations::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Check whether a name is free for a new country.
///
/// # Access Control
/// - `Supplier` - Suppliers and admins
///
/// # Returns
/// - `200 OK` - `exists` is true when the name is already used
#[utoipa::path(
    post,
    path = "/api/countries/validate",
    tag = COUNTRY_TAG,
    request_body = ValidateNameDto,
    responses(
        (status = 200, description = "Whether the name is taken", body = ExistsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn validate_country_name(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ValidateNameDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let available = CountryService::new(&state.db)
        .name_available(&payload.name)
        .await?;

    Ok((StatusCode::OK, Json(ExistsDto { exists: !available })))
}

/// Suppliers only touch the countries they created. Countries without owner are
/// admin-managed.
async fn ensure_country_owner(
    service: &CountryService<'_>,
    user: &User,
    id: i32,
) -> Result<Country, AppError> {
    let Some(country) = service.get(id).await? else {
        return Err(AppError::NotFound(format!("Country {} not found", id)));
    };

    if !user.is_admin() && country.supplier_id != Some(user.id) {
        return Err(AuthError::AccessDenied(
            user.id,
            format!("country {} is managed by someone else", id),
        )
        .into());
    }

    Ok(country)
}
