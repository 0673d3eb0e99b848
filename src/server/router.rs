//! HTTP routes and OpenAPI documentation.
//!
//! Every endpoint is registered through `OpenApiRouter` so the generated document
//! served at `/api/docs` always matches the mounted routes. Sign-up, sign-in and the
//! other unauthenticated mail-sending endpoints sit behind a per-IP rate limit.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::SqliteStore;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    config::Config,
    controller::{auth, booking, car, contract, country, location, notification, supplier, user},
    error::{config::ConfigError, AppError},
    state::AppState,
};

/// Requests a client may burst on rate limited routes before being throttled.
const RATE_LIMIT_BURST: u32 = 10;
/// Seconds for one throttled request to be replenished.
const RATE_LIMIT_REPLENISH_SECONDS: u64 = 6;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rentals API",
        description = "Car rental marketplace: back-office and storefront endpoints"
    ),
    tags(
        (name = "auth", description = "Registration, sign-in and account activation"),
        (name = "user", description = "Accounts, profiles, uploads and push tokens"),
        (name = "supplier", description = "Rental suppliers"),
        (name = "country", description = "Countries grouping pickup locations"),
        (name = "location", description = "Pickup and drop-off locations"),
        (name = "car", description = "Fleet management and storefront search"),
        (name = "booking", description = "Bookings, checkout and pricing"),
        (name = "contract", description = "PDF rental contracts"),
        (name = "notification", description = "In-app notifications")
    )
)]
struct ApiDoc;

/// Builds the application router.
///
/// # Arguments
/// - `state` - Shared application state
/// - `session` - Session layer backed by the database
///
/// # Returns
/// - `Ok(Router)` - Router ready to be served
/// - `Err(AppError::ConfigErr)` - A configured CORS origin is not a valid header value
/// - `Err(AppError::InternalError)` - The rate limiter configuration was rejected
pub fn router(
    state: AppState,
    session: SessionManagerLayer<SqliteStore>,
) -> Result<Router, AppError> {
    let (api, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(rate_limited_routes()?)
        .merge(auth_routes())
        .merge(user_routes())
        .merge(supplier_routes())
        .merge(country_routes())
        .merge(location_routes())
        .merge(car_routes())
        .merge(booking_routes())
        .merge(notification_routes())
        .split_for_parts();

    let cors = cors_layer(&state.config)?;
    let cdn = ServeDir::new(&state.config.cdn_root);

    Ok(api
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", openapi))
        .nest_service("/cdn", cdn)
        .layer(session)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Unauthenticated routes that create accounts or send mail.
///
/// Limited per client IP; requires the server to be started with connect info.
fn rate_limited_routes() -> Result<OpenApiRouter<AppState>, AppError> {
    let config = GovernorConfigBuilder::default()
        .per_second(RATE_LIMIT_REPLENISH_SECONDS)
        .burst_size(RATE_LIMIT_BURST)
        .finish()
        .ok_or_else(|| AppError::InternalError("Invalid rate limiter configuration".to_string()))?;

    Ok(OpenApiRouter::new()
        .routes(routes!(auth::sign_up))
        .routes(routes!(auth::admin_sign_up))
        .routes(routes!(auth::sign_in))
        .routes(routes!(auth::resend))
        .routes(routes!(auth::activate))
        .routes(routes!(user::contact))
        .layer(GovernorLayer::new(Arc::new(config))))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(auth::sign_out))
        .routes(routes!(auth::get_current_user))
        .routes(routes!(auth::check_token))
        .routes(routes!(auth::delete_tokens))
        .routes(routes!(auth::confirm_email))
        .routes(routes!(auth::validate_email))
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(user::create_user))
        .routes(routes!(user::get_user, user::update_user))
        .routes(routes!(user::set_email_notifications))
        .routes(routes!(user::set_language))
        .routes(routes!(user::change_password))
        .routes(routes!(user::check_password))
        .routes(routes!(user::has_password))
        .routes(routes!(user::search_users))
        .routes(routes!(user::delete_users))
        .routes(routes!(user::upload_temp_avatar))
        .routes(routes!(user::delete_temp_avatar))
        .routes(routes!(user::update_avatar, user::delete_avatar))
        .routes(routes!(user::upload_temp_license))
        .routes(routes!(user::delete_temp_license))
        .routes(routes!(user::update_license, user::delete_license))
        .routes(routes!(
            user::get_push_token,
            user::set_push_token,
            user::delete_push_token
        ))
}

fn supplier_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(supplier::get_suppliers))
        .routes(routes!(supplier::get_all_suppliers))
        .routes(routes!(supplier::get_frontend_suppliers))
        .routes(routes!(
            supplier::get_supplier,
            supplier::update_supplier,
            supplier::delete_supplier
        ))
        .routes(routes!(supplier::validate_supplier_name))
}

fn country_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(country::create_country, country::get_countries))
        .routes(routes!(
            country::get_country,
            country::update_country,
            country::delete_country
        ))
        .routes(routes!(country::country_in_use))
        .routes(routes!(country::get_countries_with_locations))
        .routes(routes!(country::validate_country_name))
}

fn location_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(location::create_location, location::get_locations))
        .routes(routes!(
            location::get_location,
            location::update_location,
            location::delete_location
        ))
        .routes(routes!(location::location_in_use))
        .routes(routes!(location::get_locations_with_position))
        .routes(routes!(location::validate_location_name))
        .routes(routes!(location::upload_temp_location_image))
        .routes(routes!(location::delete_temp_location_image))
        .routes(routes!(
            location::update_location_image,
            location::delete_location_image
        ))
}

fn car_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(car::create_car))
        .routes(routes!(car::get_car, car::update_car, car::delete_car))
        .routes(routes!(car::search_cars))
        .routes(routes!(car::get_booking_cars))
        .routes(routes!(car::get_frontend_cars))
        .routes(routes!(car::car_in_use))
        .routes(routes!(car::upload_temp_car_image))
        .routes(routes!(car::delete_temp_car_image))
        .routes(routes!(car::update_car_image, car::delete_car_image))
}

fn booking_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(booking::create_booking))
        .routes(routes!(booking::get_booking, booking::update_booking))
        .routes(routes!(booking::update_booking_status))
        .routes(routes!(booking::delete_bookings))
        .routes(routes!(booking::delete_temp_booking))
        .routes(routes!(booking::search_bookings))
        .routes(routes!(booking::has_bookings))
        .routes(routes!(booking::cancel_booking_request))
        .routes(routes!(booking::checkout))
        .routes(routes!(booking::confirm_checkout))
        .routes(routes!(booking::get_booking_id_by_session))
        .routes(routes!(booking::quote_price))
        .routes(routes!(
            contract::generate_contract,
            contract::download_contract
        ))
}

fn notification_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(notification::get_notifications))
        .routes(routes!(notification::get_notification_counter))
        .routes(routes!(notification::mark_notifications_read))
        .routes(routes!(notification::mark_notifications_unread))
        .routes(routes!(notification::delete_notifications))
}

/// Cross-origin access for the back-office and storefront; cookies are allowed so
/// the session survives cross-origin requests.
fn cors_layer(config: &Config) -> Result<CorsLayer, AppError> {
    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    name: "CORS_ORIGINS".to_string(),
                    reason: format!("{}: {}", origin, e),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true))
}
