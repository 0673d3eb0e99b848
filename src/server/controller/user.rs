use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, ExistsDto, FilenameDto, IdsDto},
        enums::UserType,
        user::{
            ChangePasswordDto, CheckPasswordDto, ContactDto, CreateUserDto,
            EmailNotificationsDto, LanguageDto, PaginatedUsersDto, PushTokenDto, UpdateUserDto,
            UserDto, UserSearchDto,
        },
    },
    server::{
        controller::read_upload,
        error::AppError,
        middleware::auth::{ensure_owner, AuthGuard, Permission},
        model::user::{CreateUserParams, UpdateUserParams, UserSearchParams},
        service::{auth::AuthService, user::UserService},
        state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

fn user_service(state: &AppState) -> UserService<'_> {
    UserService::new(&state.db, &state.mailer, &state.config, &state.storage)
}

/// Create an account from the back-office.
///
/// The account has no password: an activation link is mailed to its address.
/// Temporary avatar and license uploads named in the payload are moved into place.
///
/// # Access Control
/// - `Admin` - Any type of account
/// - `Supplier` - Customer accounts only
///
/// # Arguments
/// - `state` - Application state containing the database connection and mailer
/// - `session` - User's session for authentication
/// - `payload` - Account type, identity and supplier settings
///
/// # Returns
/// - `201 Created` - The new account
/// - `400 Bad Request` - Invalid name or email
/// - `403 Forbidden` - A supplier tried to create a non-customer account
/// - `409 Conflict` - Email, or supplier name, already used
#[utoipa::path(
    post,
    path = "/api/users",
    tag = USER_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Invalid account fields", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Account type not allowed", body = ErrorDto),
        (status = 409, description = "Email or supplier name already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let creator = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let user = user_service(&state)
        .create(
            &creator,
            CreateUserParams::from_dto(payload, &state.config.default_language),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Get an account.
///
/// # Access Control
/// - `Supplier` - Suppliers and admins can view any account
/// - Customers - Only their own account
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved account", body = UserDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the account owner", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).require(&[]).await?;
    if caller.user_type == UserType::User {
        ensure_owner(&caller, id)?;
    }

    match user_service(&state).get(id).await? {
        Some(user) => Ok((StatusCode::OK, Json(user.into_dto()))),
        None => Err(AppError::NotFound(format!("User {} not found", id))),
    }
}

/// Update a profile.
///
/// Type, blacklist and pay-later flags are only changed when an admin updates the
/// account.
///
/// # Access Control
/// - The account owner or an admin
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Account updated", body = UserDto),
        (status = 400, description = "Invalid name", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the account owner or an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).require(&[]).await?;
    ensure_owner(&caller, id)?;

    match user_service(&state)
        .update(&caller, UpdateUserParams::from_dto(id, payload))
        .await?
    {
        Some(user) => Ok((StatusCode::OK, Json(user.into_dto()))),
        None => Err(AppError::NotFound(format!("User {} not found", id))),
    }
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/email-notifications",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = EmailNotificationsDto,
    responses(
        (status = 204, description = "Preference saved"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the account owner or an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_email_notifications(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<EmailNotificationsDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).require(&[]).await?;
    ensure_owner(&caller, id)?;

    user_service(&state)
        .set_email_notifications(id, payload.enabled)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/language",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = LanguageDto,
    responses(
        (status = 204, description = "Language saved"),
        (status = 400, description = "Empty language", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the account owner or an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_language(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<LanguageDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).require(&[]).await?;
    ensure_owner(&caller, id)?;

    user_service(&state)
        .set_language(id, &payload.language)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Change a password.
///
/// The current password is required unless an admin changes another account's.
///
/// # Returns
/// - `204 No Content` - Password changed
/// - `400 Bad Request` - New password too short
/// - `401 Unauthorized` - Current password missing or wrong
#[utoipa::path(
    put,
    path = "/api/users/{id}/password",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = ChangePasswordDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Invalid new password", body = ErrorDto),
        (status = 401, description = "Not authenticated or wrong password", body = ErrorDto),
        (status = 403, description = "Not the account owner or an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).require(&[]).await?;
    ensure_owner(&caller, id)?;

    AuthService::new(&state.db, &state.mailer, &state.config)
        .change_password(
            &caller,
            id,
            payload.password.as_deref(),
            &payload.new_password,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Check the signed-in user's password, before sensitive changes.
#[utoipa::path(
    post,
    path = "/api/users/check-password",
    tag = USER_TAG,
    request_body = CheckPasswordDto,
    responses(
        (status = 200, description = "Whether the password matches", body = ExistsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_password(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CheckPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let exists = AuthService::new(&state.db, &state.mailer, &state.config)
        .check_password(&caller, &payload.password)?;

    Ok((StatusCode::OK, Json(ExistsDto { exists })))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/has-password",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Whether the account has a password", body = ExistsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the account owner or an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn has_password(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).require(&[]).await?;
    ensure_owner(&caller, id)?;

    let exists = AuthService::new(&state.db, &state.mailer, &state.config)
        .has_password(id)
        .await?;

    Ok((StatusCode::OK, Json(ExistsDto { exists })))
}

/// Search accounts by type and keyword.
///
/// Suppliers only find customers who booked one of their cars. The caller is never
/// part of the results.
///
/// # Access Control
/// - `Supplier` - Suppliers and admins
#[utoipa::path(
    post,
    path = "/api/users/search",
    tag = USER_TAG,
    request_body = UserSearchDto,
    responses(
        (status = 200, description = "Matching accounts", body = PaginatedUsersDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a supplier or admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_users(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UserSearchDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Supplier])
        .await?;

    let params = UserSearchParams {
        user_types: payload.user_types,
        keyword: payload
            .keyword
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty()),
        page: payload.page,
        per_page: payload.entries,
        ..Default::default()
    };

    let users = user_service(&state).search(&caller, params).await?;

    Ok((StatusCode::OK, Json(users.into_dto())))
}

/// Delete accounts with everything they own.
///
/// Deleting a supplier removes its cars, their bookings and files; deleting a
/// customer removes the bookings they drive.
///
/// # Access Control
/// - `Admin` - Only admins
#[utoipa::path(
    post,
    path = "/api/users/delete",
    tag = USER_TAG,
    request_body = IdsDto,
    responses(
        (status = 204, description = "Accounts deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_users(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<IdsDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    user_service(&state).delete_many(payload.ids).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Store an avatar before its account exists.
///
/// Public so visitors can attach an avatar while signing up. Expects a multipart
/// `file` field.
#[utoipa::path(
    post,
    path = "/api/users/avatars/temp",
    tag = USER_TAG,
    responses(
        (status = 201, description = "Temporary avatar stored", body = FilenameDto),
        (status = 400, description = "Missing or empty file", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_temp_avatar(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let (file_name, bytes) = read_upload(multipart).await?;
    let filename = user_service(&state)
        .upload_temp_avatar(&file_name, &bytes)
        .await?;

    Ok((StatusCode::CREATED, Json(FilenameDto { filename })))
}

#[utoipa::path(
    delete,
    path = "/api/users/avatars/temp/{name}",
    tag = USER_TAG,
    params(
        ("name" = String, Path, description = "Temporary file name")
    ),
    responses(
        (status = 204, description = "Temporary avatar deleted"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_temp_avatar(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    user_service(&state).delete_temp_avatar(&name).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Replace the avatar of an account. Expects a multipart `file` field.
#[utoipa::path(
    put,
    path = "/api/users/{id}/avatar",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Avatar replaced", body = FilenameDto),
        (status = 400, description = "Missing or empty file", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the account owner or an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_avatar(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).require(&[]).await?;
    ensure_owner(&caller, id)?;

    let (file_name, bytes) = read_upload(multipart).await?;
    match user_service(&state)
        .update_avatar(id, &file_name, &bytes)
        .await?
    {
        Some(filename) => Ok((StatusCode::OK, Json(FilenameDto { filename }))),
        None => Err(AppError::NotFound(format!("User {} not found", id))),
    }
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/avatar",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "Avatar deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the account owner or an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_avatar(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).require(&[]).await?;
    ensure_owner(&caller, id)?;

    if user_service(&state).delete_avatar(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("User {} not found", id)))
    }
}

/// Store a driver license document before its account exists.
///
/// Public so the license can be attached during checkout. Expects a multipart
/// `file` field.
#[utoipa::path(
    post,
    path = "/api/users/licenses/temp",
    tag = USER_TAG,
    responses(
        (status = 201, description = "Temporary license stored", body = FilenameDto),
        (status = 400, description = "Missing or empty file", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_temp_license(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let (file_name, bytes) = read_upload(multipart).await?;
    let filename = user_service(&state)
        .upload_temp_license(&file_name, &bytes)
        .await?;

    Ok((StatusCode::CREATED, Json(FilenameDto { filename })))
}

#[utoipa::path(
    delete,
    path = "/api/users/licenses/temp/{name}",
    tag = USER_TAG,
    params(
        ("name" = String, Path, description = "Temporary file name")
    ),
    responses(
        (status = 204, description = "Temporary license deleted"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_temp_license(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    user_service(&state).delete_temp_license(&name).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/license",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "License replaced", body = FilenameDto),
        (status = 400, description = "Missing or empty file", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the account owner or an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_license(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).require(&[]).await?;
    ensure_owner(&caller, id)?;

    let (file_name, bytes) = read_upload(multipart).await?;
    match user_service(&state)
        .update_license(id, &file_name, &bytes)
        .await?
    {
        Some(filename) => Ok((StatusCode::OK, Json(FilenameDto { filename }))),
        None => Err(AppError::NotFound(format!("User {} not found", id))),
    }
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/license",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "License deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the account owner or an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_license(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).require(&[]).await?;
    ensure_owner(&caller, id)?;

    if user_service(&state).delete_license(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("User {} not found", id)))
    }
}

/// Get the mobile push token of an account.
#[utoipa::path(
    get,
    path = "/api/users/{id}/push-token",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Stored push token", body = PushTokenDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the account owner or an admin", body = ErrorDto),
        (status = 404, description = "No push token stored", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_push_token(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).require(&[]).await?;
    ensure_owner(&caller, id)?;

    match user_service(&state).get_push_token(id).await? {
        Some(token) => Ok((StatusCode::OK, Json(PushTokenDto { token }))),
        None => Err(AppError::NotFound(format!("No push token for user {}", id))),
    }
}

/// Store the mobile push token of an account, replacing the previous one.
#[utoipa::path(
    put,
    path = "/api/users/{id}/push-token",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = PushTokenDto,
    responses(
        (status = 204, description = "Push token stored"),
        (status = 400, description = "Malformed push token", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the account owner or an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_push_token(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<PushTokenDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).require(&[]).await?;
    ensure_owner(&caller, id)?;

    user_service(&state)
        .set_push_token(id, payload.token)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/push-token",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "Push token deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the account owner or an admin", body = ErrorDto),
        (status = 404, description = "No push token stored", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_push_token(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).require(&[]).await?;
    ensure_owner(&caller, id)?;

    if user_service(&state).delete_push_token(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("No push token for user {}", id)))
    }
}

/// Forward a contact form message to the admin mailbox.
///
/// # Access Control
/// - Public, rate limited
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = USER_TAG,
    request_body = ContactDto,
    responses(
        (status = 204, description = "Message sent"),
        (status = 400, description = "Invalid sender or subject", body = ErrorDto),
        (status = 404, description = "No contact address configured", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactDto>,
) -> Result<impl IntoResponse, AppError> {
    user_service(&state)
        .contact(&payload.from, &payload.subject, &payload.message)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
