use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, ExistsDto},
        user::{
            ActivateDto, CheckTokenDto, ConfirmEmailDto, ResendDto, SignInDto, SignUpDto,
            UserDto, ValidateEmailDto,
        },
    },
    server::{
        error::AppError,
        middleware::{
            auth::{ensure_owner, AuthGuard},
            session::AuthSession,
        },
        model::user::SignUpParams,
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Register a customer account.
///
/// The account stays unverified, and is purged once it expires, until the emailed
/// confirmation link is followed.
///
/// # Access Control
/// - Public, rate limited
///
/// # Arguments
/// - `state` - Application state containing the database connection and mailer
/// - `payload` - Name, email, password and optional profile fields
///
/// # Returns
/// - `201 Created` - The new account
/// - `400 Bad Request` - Invalid name, email or password
/// - `409 Conflict` - Email already registered
#[utoipa::path(
    post,
    path = "/api/auth/sign-up",
    tag = AUTH_TAG,
    request_body = SignUpDto,
    responses(
        (status = 201, description = "Account registered", body = UserDto),
        (status = 400, description = "Invalid account fields", body = ErrorDto),
        (status = 409, description = "Email already registered", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<SignUpDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(&state.db, &state.mailer, &state.config)
        .sign_up(SignUpParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Register an admin account.
///
/// Open to anyone while no admin exists, so the first admin can be created on a
/// fresh install. Afterwards only signed-in admins may add admins.
///
/// # Access Control
/// - Public until the first admin exists, then `Admin`
///
/// # Returns
/// - `201 Created` - The new, verified admin
/// - `401 Unauthorized` - An admin exists and nobody is signed in
/// - `403 Forbidden` - An admin exists and the caller is not one
#[utoipa::path(
    post,
    path = "/api/auth/admin/sign-up",
    tag = AUTH_TAG,
    request_body = SignUpDto,
    responses(
        (status = 201, description = "Admin registered", body = UserDto),
        (status = 400, description = "Invalid account fields", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 409, description = "Email already registered", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn admin_sign_up(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SignUpDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &session).optional().await?;

    let user = AuthService::new(&state.db, &state.mailer, &state.config)
        .admin_sign_up(SignUpParams::from_dto(payload), caller.as_ref())
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Sign in with email and password.
///
/// `app` names the client signing in; customers may not sign in to the
/// back-office. A confirmed email is not required.
///
/// # Access Control
/// - Public, rate limited
///
/// # Returns
/// - `200 OK` - The signed-in account; the session cookie now carries it
/// - `401 Unauthorized` - Wrong email or password
/// - `403 Forbidden` - Customer on the back-office, blacklisted or deactivated account
#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    tag = AUTH_TAG,
    request_body = SignInDto,
    responses(
        (status = 200, description = "Signed in", body = UserDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 403, description = "Blacklisted, deactivated or customer on the back-office", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sign_in(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SignInDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(&state.db, &state.mailer, &state.config)
        .sign_in(&payload.email, &payload.password, payload.app)
        .await?;

    AuthSession::new(&session).set_user_id(user.id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Signed out"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sign_out(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the signed-in account.
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "The signed-in account", body = UserDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Check an activation or reset token before showing the password form.
///
/// # Returns
/// - `200 OK` - `exists` is true when the token is valid for that account
#[utoipa::path(
    post,
    path = "/api/auth/check-token",
    tag = AUTH_TAG,
    request_body = CheckTokenDto,
    responses(
        (status = 200, description = "Whether the token is valid", body = ExistsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_token(
    State(state): State<AppState>,
    Json(payload): Json<CheckTokenDto>,
) -> Result<impl IntoResponse, AppError> {
    let exists = AuthService::new(&state.db, &state.mailer, &state.config)
        .check_token(payload.user_id, &payload.email, &payload.token)
        .await?;

    Ok((StatusCode::OK, Json(ExistsDto { exists })))
}

/// Revoke every outstanding token of an account.
///
/// # Access Control
/// - The account owner or an admin
#[utoipa::path(
    delete,
    path = "/api/auth/tokens/{user_id}",
    tag = AUTH_TAG,
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "Tokens revoked"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the account owner or an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_tokens(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    ensure_owner(&user, user_id)?;

    AuthService::new(&state.db, &state.mailer, &state.config)
        .delete_tokens(user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Mail a new activation link, or a password reset link when `reset` is set.
///
/// Earlier tokens of the account are revoked.
///
/// # Access Control
/// - Public, rate limited
///
/// # Returns
/// - `204 No Content` - Link sent
/// - `404 Not Found` - No account with that email
/// - `409 Conflict` - Activation requested for an activated account
#[utoipa::path(
    post,
    path = "/api/auth/resend",
    tag = AUTH_TAG,
    request_body = ResendDto,
    responses(
        (status = 204, description = "Link sent"),
        (status = 400, description = "Invalid email", body = ErrorDto),
        (status = 404, description = "No account with that email", body = ErrorDto),
        (status = 409, description = "Account already activated", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn resend(
    State(state): State<AppState>,
    Json(payload): Json<ResendDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthService::new(&state.db, &state.mailer, &state.config)
        .resend(&payload.email, payload.reset, payload.app)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Set a password with an activation or reset token.
///
/// The account becomes verified and the token is spent.
///
/// # Access Control
/// - Public, rate limited
///
/// # Returns
/// - `200 OK` - The activated account
/// - `400 Bad Request` - Invalid or expired token, or weak password
#[utoipa::path(
    post,
    path = "/api/auth/activate",
    tag = AUTH_TAG,
    request_body = ActivateDto,
    responses(
        (status = 200, description = "Account activated", body = UserDto),
        (status = 400, description = "Invalid token or password", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn activate(
    State(state): State<AppState>,
    Json(payload): Json<ActivateDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(&state.db, &state.mailer, &state.config)
        .activate(payload.user_id, &payload.token, &payload.password)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Confirm the email of a self-registered account.
#[utoipa::path(
    post,
    path = "/api/auth/confirm-email",
    tag = AUTH_TAG,
    request_body = ConfirmEmailDto,
    responses(
        (status = 200, description = "Email confirmed", body = UserDto),
        (status = 400, description = "Invalid or expired token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn confirm_email(
    State(state): State<AppState>,
    Json(payload): Json<ConfirmEmailDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(&state.db, &state.mailer, &state.config)
        .confirm_email(&payload.email, &payload.token)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/auth/validate-email",
    tag = AUTH_TAG,
    request_body = ValidateEmailDto,
    responses(
        (status = 200, description = "Whether the email is registered", body = ExistsDto),
        (status = 400, description = "Invalid email", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn validate_email(
    State(state): State<AppState>,
    Json(payload): Json<ValidateEmailDto>,
) -> Result<impl IntoResponse, AppError> {
    let available = AuthService::new(&state.db, &state.mailer, &state.config)
        .email_available(&payload.email)
        .await?;

    Ok((StatusCode::OK, Json(ExistsDto { exists: !available })))
}
