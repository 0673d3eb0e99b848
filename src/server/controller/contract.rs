use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::api::{ErrorDto, FilenameDto},
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        service::contract::{file_name, ContractService},
        state::AppState,
    },
};

/// Tag for grouping contract endpoints in OpenAPI documentation
pub static CONTRACT_TAG: &str = "contract";

/// Generate the PDF rental contract of a booking.
///
/// The contract is rendered from the booking, its car, driver and locations, then
/// stored under the CDN `contracts` folder, replacing any earlier version.
///
/// # Access Control
/// - `Admin` - Any booking
/// - `Supplier` - Bookings of their cars
/// - Customers - Bookings they drive
///
/// # Returns
/// - `201 Created` - Name of the stored contract
/// - `404 Not Found` - Unknown booking, or no PDF renderer configured
/// - `500 Internal Server Error` - The renderer failed
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/contract",
    tag = CONTRACT_TAG,
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 201, description = "Contract generated", body = FilenameDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not a party to the booking", body = ErrorDto),
        (status = 404, description = "Booking not found or no renderer configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn generate_contract(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    match ContractService::new(&state.db, &state.http_client, &state.config, &state.storage)
        .generate(&user, id)
        .await?
    {
        Some(filename) => Ok((StatusCode::CREATED, Json(FilenameDto { filename }))),
        None => Err(AppError::NotFound(format!("Booking {} not found", id))),
    }
}

/// Download the stored contract of a booking as `application/pdf`.
#[utoipa::path(
    get,
    path = "/api/bookings/{id}/contract",
    tag = CONTRACT_TAG,
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Contract PDF", content_type = "application/pdf", body = Vec<u8>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not a party to the booking", body = ErrorDto),
        (status = 404, description = "Booking or contract not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn download_contract(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let Some(pdf) = ContractService::new(&state.db, &state.http_client, &state.config, &state.storage)
        .download(&user, id)
        .await?
    else {
        return Err(AppError::NotFound(format!("No contract for booking {}", id)));
    };

    let disposition = format!("attachment; filename=\"{}\"", file_name(id));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    ))
}
