use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, IdsDto, ListQuery},
        notification::{NotificationCounterDto, PaginatedNotificationsDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard,
        service::notification::NotificationService, state::AppState,
    },
};

/// Tag for grouping notification endpoints in OpenAPI documentation
pub static NOTIFICATION_TAG: &str = "notification";

fn notification_service(state: &AppState) -> NotificationService<'_> {
    NotificationService::new(&state.db, &state.mailer, &state.push)
}

/// Get the signed-in user's notifications, newest first.
///
/// `keyword` is ignored.
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = NOTIFICATION_TAG,
    params(ListQuery),
    responses(
        (status = 200, description = "Notifications of the user", body = PaginatedNotificationsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_notifications(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let notifications = notification_service(&state)
        .get_paginated(user.id, params.page, params.entries)
        .await?;

    Ok((StatusCode::OK, Json(notifications.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/notifications/counter",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Unread notification count", body = NotificationCounterDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_notification_counter(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let count = notification_service(&state).get_counter(user.id).await?;

    Ok((StatusCode::OK, Json(NotificationCounterDto { count })))
}

/// Mark notifications as read. Ids of other users' notifications are ignored.
///
/// # Returns
/// - `200 OK` - The new unread count
#[utoipa::path(
    post,
    path = "/api/notifications/read",
    tag = NOTIFICATION_TAG,
    request_body = IdsDto,
    responses(
        (status = 200, description = "Unread notification count", body = NotificationCounterDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_notifications_read(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<IdsDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let count = notification_service(&state)
        .set_read(user.id, payload.ids, true)
        .await?;

    Ok((StatusCode::OK, Json(NotificationCounterDto { count })))
}

/// Mark notifications as unread. Ids of other users' notifications are ignored.
#[utoipa::path(
    post,
    path = "/api/notifications/unread",
    tag = NOTIFICATION_TAG,
    request_body = IdsDto,
    responses(
        (status = 200, description = "Unread notification count", body = NotificationCounterDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_notifications_unread(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<IdsDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let count = notification_service(&state)
        .set_read(user.id, payload.ids, false)
        .await?;

    Ok((StatusCode::OK, Json(NotificationCounterDto { count })))
}

#[utoipa::path(
    post,
    path = "/api/notifications/delete",
    tag = NOTIFICATION_TAG,
    request_body = IdsDto,
    responses(
        (status = 200, description = "Unread notification count", body = NotificationCounterDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_notifications(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<IdsDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let count = notification_service(&state)
        .delete(user.id, payload.ids)
        .await?;

    Ok((StatusCode::OK, Json(NotificationCounterDto { count })))
}
