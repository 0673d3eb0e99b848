use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::User,
};

pub enum Permission {
    /// Back-office administrators.
    Admin,
    /// Suppliers and administrators.
    Supplier,
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Resolves the signed-in user and checks every listed permission.
    ///
    /// An empty permission list accepts any signed-in user. Blacklisted accounts are
    /// refused even when their session is still alive.
    ///
    /// # Returns
    /// - `Ok(User)` - The signed-in user
    /// - `Err(AuthError::UserNotInSession)` - Nobody is signed in
    /// - `Err(AuthError::UserNotInDatabase)` - The account was deleted
    /// - `Err(AuthError::AccessDenied)` - A permission is missing
    /// - `Err(AuthError::Blacklisted)` - The account is blacklisted
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        if user.blacklisted {
            return Err(AuthError::Blacklisted(user_id).into());
        }

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !user.is_admin() {
                        return Err(AuthError::AccessDenied(
                            user_id,
                            "route requires an admin account".to_string(),
                        )
                        .into());
                    }
                }
                Permission::Supplier => {
                    if !user.is_admin() && !user.is_supplier() {
                        return Err(AuthError::AccessDenied(
                            user_id,
                            "route requires a supplier or admin account".to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }

    /// Resolves the signed-in user, if any, without requiring one.
    ///
    /// Used by routes open to guests that behave differently for signed-in users.
    pub async fn optional(&self) -> Result<Option<User>, AppError> {
        match self.require(&[]).await {
            Ok(user) => Ok(Some(user)),
            Err(AppError::AuthErr(AuthError::UserNotInSession))
            | Err(AppError::AuthErr(AuthError::UserNotInDatabase(_))) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Suppliers may only act on their own records; admins on any.
///
/// # Returns
/// - `Ok(())` - The user owns the record or is an admin
/// - `Err(AuthError::AccessDenied)` - A supplier or customer targets someone else's record
pub fn ensure_owner(user: &User, owner_id: i32) -> Result<(), AppError> {
    if user.is_admin() || user.id == owner_id {
        return Ok(());
    }

    Err(AuthError::AccessDenied(
        user.id,
        format!("record belongs to user {}", owner_id),
    )
    .into())
}
