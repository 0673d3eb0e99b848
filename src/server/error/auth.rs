use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user id is stored in the session.
    #[error("No user in session")]
    UserNotInSession,

    /// The session references a user that no longer exists.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// The signed-in user lacks the permission required by the route.
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// Unknown email, missing password or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The account has been blacklisted by an admin.
    #[error("User {0} is blacklisted")]
    Blacklisted(i32),

    /// The account has no password yet or was deactivated.
    #[error("User {0} is not activated")]
    NotActivated(i32),
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` / `UserNotInDatabase` / `InvalidCredentials` → 401 Unauthorized
/// - `AccessDenied` / `Blacklisted` / `NotActivated` → 403 Forbidden
///
/// The detailed reason is logged at debug level; clients only see a generic message.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Not signed in")
            }
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid email or password"),
            Self::AccessDenied(_, _) => (StatusCode::FORBIDDEN, "Access denied"),
            Self::Blacklisted(_) => (StatusCode::FORBIDDEN, "Account is blacklisted"),
            Self::NotActivated(_) => (StatusCode::FORBIDDEN, "Account is not activated"),
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
