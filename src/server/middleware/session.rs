//! Type-safe session management wrapper.
//!
//! The session only stores the id of the signed-in user. Wrapping it keeps the key
//! and the stored type in one place.

use tower_sessions::Session;

use crate::server::error::AppError;

const SESSION_AUTH_USER_ID: &str = "auth:user";

/// Authentication session management.
///
/// Handles storing and retrieving the authenticated user's id and the session
/// lifecycle on sign-in and sign-out.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the user's id in the session after a successful sign-in.
    ///
    /// The session id is cycled first so a pre-authentication id cannot be reused.
    ///
    /// # Returns
    /// - `Ok(())` - User id stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_user_id(&self, user_id: i32) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session.insert(SESSION_AUTH_USER_ID, user_id).await?;
        Ok(())
    }

    /// Retrieves the signed-in user's id.
    ///
    /// # Returns
    /// - `Ok(Some(user_id))` - User is signed in
    /// - `Ok(None)` - No user in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn get_user_id(&self) -> Result<Option<i32>, AppError> {
        Ok(self.session.get::<i32>(SESSION_AUTH_USER_ID).await?)
    }

    /// Removes all session data and deletes the session from the store.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.session.flush().await?;
        Ok(())
    }
}
