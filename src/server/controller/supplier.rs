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
        supplier::{
            FrontendSuppliersDto, PaginatedSuppliersDto, SupplierDto, SupplierSummaryDto,
            UpdateSupplierDto,
        },
        user::UserDto,
    },
    server::{
        error::AppError,
        middleware::auth::{ensure_owner, AuthGuard, Permission},
        model::{
            car::CarFilter,
            supplier::Supplier,
            user::{UpdateSupplierParams, User},
        },
        service::supplier::SupplierService,
        state::AppState,
    },
};

/// Tag for grouping supplier endpoints in OpenAPI documentation
pub static SUPPLIER_TAG: &str = "supplier";

/// Get paginated suppliers with their car counts.
///
/// # Access Control
/// - `Supplier` - Suppliers and admins
///
/// # Arguments
/// - `params` - Page, entries per page and optional keyword matched against the name
///
/// # Returns
/// - `200 OK` - Suppliers ordered by name
#[utoipa::path(
    get,
    path = "/api/suppliers",
    tag = SUPPLIER_TAG,
    params(ListQuery),
    responses(
        (status = 200, description = "Successfully retrieved suppliers", body = PaginatedSuppliersDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a supplier or admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_suppliers(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let suppliers = SupplierService::new(&state.db, &state.storage)
        .get_paginated(params.keyword.as_deref(), params.page, params.entries)
        .await?;

    Ok((StatusCode::OK, Json(suppliers.into_dto())))
}

/// Get every supplier as a summary, for dropdowns and storefront filters.
///
/// # Access Control
/// - Public
#[utoipa::path(
    get,
    path = "/api/suppliers/all",
    tag = SUPPLIER_TAG,
    responses(
        (status = 200, description = "All suppliers ordered by name", body = Vec<SupplierSummaryDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_suppliers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let suppliers = SupplierService::new(&state.db, &state.storage)
        .get_all()
        .await?;

    let dtos: Vec<SupplierSummaryDto> = suppliers.into_iter().map(User::into_summary_dto).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get the suppliers renting cars at a pickup location that match a filter.
///
/// `car_count` holds the number of matching cars of each supplier.
///
/// # Access Control
/// - Public
#[utoipa::path(
    post,
    path = "/api/suppliers/frontend",
    tag = SUPPLIER_TAG,
    request_body = FrontendSuppliersDto,
    responses(
        (status = 200, description = "Suppliers with matching cars", body = Vec<SupplierDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_frontend_suppliers(
    State(state): State<AppState>,
    Json(payload): Json<FrontendSuppliersDto>,
) -> Result<impl IntoResponse, AppError> {
    let filter = CarFilter::from_dto(payload.filter);
    let suppliers = SupplierService::new(&state.db, &state.storage)
        .get_frontend_suppliers(&filter, payload.pickup_location_id)
        .await?;

    let dtos: Vec<SupplierDto> = suppliers.into_iter().map(Supplier::into_dto).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/suppliers/{id}",
    tag = SUPPLIER_TAG,
    params(
        ("id" = i32, Path, description = "Supplier ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved supplier", body = SupplierDto),
        (status = 404, description = "Supplier not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    match SupplierService::new(&state.db, &state.storage).get(id).await? {
        Some(supplier) => Ok((StatusCode::OK, Json(supplier.into_dto()))),
        None => Err(AppError::NotFound(format!("Supplier {} not found", id))),
    }
}

/// Update a supplier's profile and rental settings.
///
/// # Access Control
/// - `Admin` - Any supplier
/// - `Supplier` - Only their own account
///
/// # Returns
/// - `200 OK` - Updated account
/// - `404 Not Found` - No supplier with that id
/// - `409 Conflict` - Another supplier uses the name
#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    tag = SUPPLIER_TAG,
    params(
        ("id" = i32, Path, description = "Supplier ID")
    ),
    request_body = UpdateSupplierDto,
    responses(
        (status = 200, description = "Successfully updated supplier", body = UserDto),
        (status = 400, description = "Invalid supplier name", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the supplier or an admin", body = ErrorDto),
        (status = 404, description = "Supplier not found", body = ErrorDto),
        (status = 409, description = "Supplier name already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_supplier(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateSupplierDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;
    ensure_owner(&user, id)?;

    match SupplierService::new(&state.db, &state.storage)
        .update(UpdateSupplierParams::from_dto(id, payload))
        .await?
    {
        Some(supplier) => Ok((StatusCode::OK, Json(supplier.into_dto()))),
        None => Err(AppError::NotFound(format!("Supplier {} not found", id))),
    }
}

/// Delete a supplier with its cars, their bookings and all files.
///
/// # Access Control
/// - `Admin` - Only admins
#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}",
    tag = SUPPLIER_TAG,
    params(
        ("id" = i32, Path, description = "Supplier ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted supplier"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Supplier not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_supplier(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    if SupplierService::new(&state.db, &state.storage)
        .delete(id)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Supplier {} not found", id)))
    }
}

/// Check whether a supplier name is taken.
///
/// A signed-in supplier checking a new name for itself is excluded from the
/// comparison.
#[utoipa::path(
    post,
    path = "/api/suppliers/validate",
    tag = SUPPLIER_TAG,
    request_body = ValidateNameDto,
    responses(
        (status = 200, description = "Whether the name is taken", body = ExistsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn validate_supplier_name(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ValidateNameDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let exclude = user.is_supplier().then_some(user.id);
    let available = SupplierService::new(&state.db, &state.storage)
        .name_available(&payload.name, exclude)
        .await?;

    Ok((StatusCode::OK, Json(ExistsDto { exists: !available })))
}
