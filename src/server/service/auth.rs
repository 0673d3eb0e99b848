//! Account lifecycle: sign-up, activation tokens, sign-in and passwords.
//!
//! Self signed-up customers get a password right away but stay unverified until
//! they follow the confirmation link; if they never do, the account expires and is
//! purged by the scheduler. Accounts created from the back-office have no password
//! until the activation link is used.

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use url::Url;

use crate::{
    model::enums::{App, UserType},
    server::{
        config::Config,
        data::{token::TokenRepository, user::UserRepository},
        error::{auth::AuthError, AppError},
        model::user::{CreateUserParams, SignUpParams, User},
        service::mail::{layout, Email, Mailer},
        util::{
            html::escape_html,
            password::{hash_password, verify_password},
            random::{random_code, TOKEN_LENGTH},
            validate::{validate_email, validate_name, validate_password},
        },
    },
};

/// Kind of link mailed with a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLink {
    /// Confirms the address of a self signed-up customer.
    ConfirmEmail,
    /// Lets an invited account choose its first password.
    Activate,
    ResetPassword,
}

impl TokenLink {
    fn path(&self) -> &'static str {
        match self {
            Self::ConfirmEmail => "confirm-email",
            Self::Activate => "activate",
            Self::ResetPassword => "reset-password",
        }
    }

    fn subject(&self) -> &'static str {
        match self {
            Self::ConfirmEmail => "Confirm your email address",
            Self::Activate => "Activate your account",
            Self::ResetPassword => "Reset your password",
        }
    }

    fn text(&self) -> &'static str {
        match self {
            Self::ConfirmEmail => "Please confirm your email address by following this link:",
            Self::Activate => "Your account has been created. Choose a password to activate it:",
            Self::ResetPassword => "Follow this link to choose a new password:",
        }
    }
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    mailer: &'a Mailer,
    config: &'a Config,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, mailer: &'a Mailer, config: &'a Config) -> Self {
        Self { db, mailer, config }
    }

    /// Registers a customer with a password.
    ///
    /// The account is unverified and expires after the configured delay unless the
    /// email is confirmed. A confirmation link is mailed.
    ///
    /// # Returns
    /// - `Ok(User)` - The new account
    /// - `Err(AppError::BadRequest)` - Invalid email, password or name
    /// - `Err(AppError::Conflict)` - The email is already registered
    pub async fn sign_up(&self, params: SignUpParams) -> Result<User, AppError> {
        let user = self
            .register(params, UserType::User, false, Some(self.user_expiry()))
            .await?;

        self.send_token_link(&user, TokenLink::ConfirmEmail, App::Frontend)
            .await?;

        Ok(user)
    }

    /// Registers an admin with a password.
    ///
    /// Open while no admin exists, afterwards only admins may add admins.
    ///
    /// # Returns
    /// - `Ok(User)` - The new, verified admin
    /// - `Err(AuthError::AccessDenied)` - An admin exists and the caller is not one
    pub async fn admin_sign_up(
        &self,
        params: SignUpParams,
        caller: Option<&User>,
    ) -> Result<User, AppError> {
        let admin_exists = UserRepository::new(self.db).admin_exists().await?;

        if admin_exists {
            match caller {
                Some(caller) if caller.is_admin() => {}
                Some(caller) => {
                    return Err(AuthError::AccessDenied(
                        caller.id,
                        "only admins may register admins".to_string(),
                    )
                    .into())
                }
                None => return Err(AuthError::UserNotInSession.into()),
            }
        }

        let user = self.register(params, UserType::Admin, true, None).await?;
        tracing::info!("Admin account {} registered", user.id);

        Ok(user)
    }

    async fn register(
        &self,
        params: SignUpParams,
        user_type: UserType,
        verified: bool,
        expire_at: Option<chrono::DateTime<Utc>>,
    ) -> Result<User, AppError> {
        let email = validate_email(&params.email)?;
        let full_name = validate_name("Full name", &params.full_name)?;
        validate_password(&params.password)?;

        let user_repo = UserRepository::new(self.db);
        if user_repo.email_exists(&email).await? {
            return Err(AppError::Conflict(format!("Email {} is already registered", email)));
        }

        let language = params
            .language
            .unwrap_or_else(|| self.config.default_language.clone());

        let mut create = CreateUserParams::customer(full_name, email, language);
        create.user_type = user_type;
        create.password = Some(hash_password(&params.password)?);
        create.birth_date = params.birth_date;
        create.phone = params.phone;
        create.verified = verified;
        create.expire_at = expire_at;

        user_repo.create(create).await
    }

    /// Deadline given to self signed-up customers to confirm their address.
    pub fn user_expiry(&self) -> chrono::DateTime<Utc> {
        Utc::now() + Duration::seconds(self.config.user_expire_seconds)
    }

    /// Issues a token for a user and mails the matching link.
    ///
    /// Mail failures are logged; the token stays valid so the link can be resent.
    pub async fn send_token_link(
        &self,
        user: &User,
        link: TokenLink,
        app: App,
    ) -> Result<(), AppError> {
        let token = self.issue_token(user.id).await?;
        let url = self.token_url(link, app, user, &token)?;

        let email = Email {
            to: user.email.clone(),
            subject: link.subject().to_string(),
            html: layout(
                &format!("Hello {},", escape_html(&user.full_name)),
                &[
                    link.text().to_string(),
                    format!("<a href=\"{0}\">{0}</a>", escape_html(url.as_str())),
                ],
            ),
        };

        if let Err(e) = self.mailer.send(&email).await {
            tracing::warn!("Failed to mail {} link to user {}: {}", link.path(), user.id, e);
        }

        Ok(())
    }

    /// Application a user's links point to.
    pub fn app_for(user: &User) -> App {
        match user.user_type {
            UserType::Admin | UserType::Supplier => App::Admin,
            UserType::User => App::Frontend,
        }
    }

    async fn issue_token(&self, user_id: i32) -> Result<String, AppError> {
        let token = random_code(TOKEN_LENGTH);
        let expire_at = Utc::now() + Duration::seconds(self.config.token_expire_seconds);

        TokenRepository::new(self.db)
            .create(user_id, token.clone(), expire_at)
            .await?;

        Ok(token)
    }

    fn token_url(&self, link: TokenLink, app: App, user: &User, token: &str) -> Result<Url, AppError> {
        let base = match app {
            App::Admin => &self.config.admin_url,
            App::Frontend => &self.config.frontend_url,
        };

        let user_id = user.id.to_string();
        Url::parse_with_params(
            &format!("{}/{}", base.trim_end_matches('/'), link.path()),
            &[
                ("u", user_id.as_str()),
                ("e", user.email.as_str()),
                ("t", token),
            ],
        )
        .map_err(|e| AppError::InternalError(format!("Invalid link base {}: {}", base, e)))
    }

    /// Checks a token issued to the user with this id and email.
    pub async fn check_token(&self, user_id: i32, email: &str, token: &str) -> Result<bool, AppError> {
        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Ok(false);
        };

        if user.email != email.trim().to_lowercase() {
            return Ok(false);
        }

        Ok(TokenRepository::new(self.db)
            .is_valid(user_id, token, Utc::now())
            .await?)
    }

    pub async fn delete_tokens(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(TokenRepository::new(self.db).delete_by_user(user_id).await?)
    }

    /// Replaces a user's tokens and mails a new activation or reset link.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - No account with this email
    /// - `Err(AppError::Conflict)` - Activation requested for an activated account
    pub async fn resend(&self, email: &str, reset: bool, app: App) -> Result<(), AppError> {
        let email = validate_email(email)?;
        let Some(user) = UserRepository::new(self.db).find_by_email(&email).await? else {
            return Err(AppError::NotFound(format!("No account for {}", email)));
        };

        let link = if reset {
            TokenLink::ResetPassword
        } else if user.password.is_none() {
            TokenLink::Activate
        } else if !user.verified {
            TokenLink::ConfirmEmail
        } else {
            return Err(AppError::Conflict("Account is already activated".to_string()));
        };

        TokenRepository::new(self.db).delete_by_user(user.id).await?;
        self.send_token_link(&user, link, app).await
    }

    /// Sets the password of an invited account, or resets a forgotten one.
    ///
    /// The account becomes verified and its tokens are deleted.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Invalid password, or unknown or expired token
    pub async fn activate(&self, user_id: i32, token: &str, password: &str) -> Result<User, AppError> {
        validate_password(password)?;

        let token_repo = TokenRepository::new(self.db);
        if !token_repo.is_valid(user_id, token, Utc::now()).await? {
            return Err(AppError::BadRequest("Invalid or expired token".to_string()));
        }

        let user_repo = UserRepository::new(self.db);
        user_repo
            .mark_verified(user_id, Some(hash_password(password)?))
            .await?;
        token_repo.delete_by_user(user_id).await?;

        user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
    }

    /// Confirms the address of a self signed-up customer.
    pub async fn confirm_email(&self, email: &str, token: &str) -> Result<User, AppError> {
        let email = validate_email(email)?;
        let user_repo = UserRepository::new(self.db);
        let Some(user) = user_repo.find_by_email(&email).await? else {
            return Err(AppError::NotFound(format!("No account for {}", email)));
        };

        if user.verified {
            return Ok(user);
        }

        let token_repo = TokenRepository::new(self.db);
        if !token_repo.is_valid(user.id, token, Utc::now()).await? {
            return Err(AppError::BadRequest("Invalid or expired token".to_string()));
        }

        user_repo.mark_verified(user.id, None).await?;
        token_repo.delete_by_user(user.id).await?;

        user_repo
            .find_by_id(user.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.id)))
    }

    /// Checks credentials for the given application.
    ///
    /// # Returns
    /// - `Ok(User)` - Credentials valid
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// - `Err(AuthError::NotActivated)` - No password set yet, or account deactivated
    /// - `Err(AuthError::Blacklisted)` - Account blacklisted
    /// - `Err(AuthError::AccessDenied)` - Customer signing in to the back-office
    pub async fn sign_in(&self, email: &str, password: &str, app: App) -> Result<User, AppError> {
        let email = email.trim().to_lowercase();
        let Some(user) = UserRepository::new(self.db).find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let Some(hash) = user.password.as_deref() else {
            return Err(AuthError::NotActivated(user.id).into());
        };

        if !verify_password(password, hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        if user.blacklisted {
            return Err(AuthError::Blacklisted(user.id).into());
        }

        if !user.active {
            return Err(AuthError::NotActivated(user.id).into());
        }

        if app == App::Admin && !user.is_admin() && !user.is_supplier() {
            return Err(AuthError::AccessDenied(
                user.id,
                "customers cannot sign in to the back-office".to_string(),
            )
            .into());
        }

        Ok(user)
    }

    /// Changes a password.
    ///
    /// The current password must match unless an admin changes another account.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Unknown target account
    /// - `Err(AuthError::InvalidCredentials)` - Current password missing or wrong
    pub async fn change_password(
        &self,
        caller: &User,
        user_id: i32,
        current: Option<&str>,
        new_password: &str,
    ) -> Result<(), AppError> {
        validate_password(new_password)?;

        let user_repo = UserRepository::new(self.db);
        let Some(target) = user_repo.find_by_id(user_id).await? else {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        };

        let admin_override = caller.is_admin() && caller.id != target.id;
        if !admin_override {
            let matches = match (current, target.password.as_deref()) {
                (Some(current), Some(hash)) => verify_password(current, hash)?,
                _ => false,
            };
            if !matches {
                return Err(AuthError::InvalidCredentials.into());
            }
        }

        user_repo
            .set_password(target.id, hash_password(new_password)?)
            .await?;

        Ok(())
    }

    pub fn check_password(&self, user: &User, password: &str) -> Result<bool, AppError> {
        match user.password.as_deref() {
            Some(hash) => verify_password(password, hash),
            None => Ok(false),
        }
    }

    pub async fn has_password(&self, user_id: i32) -> Result<bool, AppError> {
        Ok(UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .is_some_and(|user| user.password.is_some()))
    }

    /// Whether an address is still free for a new account.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Malformed address
    pub async fn email_available(&self, email: &str) -> Result<bool, AppError> {
        let email = validate_email(email)?;
        Ok(!UserRepository::new(self.db).email_exists(&email).await?)
    }
}
