//! User service for business logic.
//!
//! Profiles, back-office account creation, user search, account deletion with the
//! cleanup of files and additional drivers, avatars, licenses, push tokens and the
//! contact form.

use sea_orm::DatabaseConnection;

use crate::{
    model::enums::UserType,
    server::{
        config::Config,
        data::{
            booking::BookingRepository, car::CarRepository, push_token::PushTokenRepository,
            user::UserRepository,
        },
        error::{auth::AuthError, AppError},
        model::{
            page_count,
            user::{CreateUserParams, PaginatedUsers, UpdateUserParams, User, UserSearchParams},
        },
        service::{
            auth::{AuthService, TokenLink},
            mail::{layout, Email, Mailer},
            push::is_push_token,
            storage::{FileStorage, Folder},
        },
        util::{
            html::escape_html,
            validate::{validate_email, validate_name},
        },
    },
};

/// Service providing business logic for user management.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
    mailer: &'a Mailer,
    config: &'a Config,
    storage: &'a FileStorage,
}

impl<'a> UserService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        mailer: &'a Mailer,
        config: &'a Config,
        storage: &'a FileStorage,
    ) -> Self {
        Self {
            db,
            mailer,
            config,
            storage,
        }
    }

    pub async fn get(&self, id: i32) -> Result<Option<User>, AppError> {
        UserRepository::new(self.db).find_by_id(id).await
    }

    /// Creates an account from the back-office and mails its activation link.
    ///
    /// Admins create any type of account; suppliers only customers. Temporary
    /// avatar and license uploads named in `params` are moved into place.
    ///
    /// # Returns
    /// - `Ok(User)` - The new account, without password
    /// - `Err(AuthError::AccessDenied)` - A supplier tried to create a non-customer
    /// - `Err(AppError::Conflict)` - Email, or supplier name, already used
    pub async fn create(&self, creator: &User, mut params: CreateUserParams) -> Result<User, AppError> {
        if !creator.is_admin() && params.user_type != UserType::User {
            return Err(AuthError::AccessDenied(
                creator.id,
                "suppliers may only create customer accounts".to_string(),
            )
            .into());
        }

        params.email = validate_email(&params.email)?;
        params.full_name = validate_name("Full name", &params.full_name)?;

        let user_repo = UserRepository::new(self.db);
        if user_repo.email_exists(&params.email).await? {
            return Err(AppError::Conflict(format!(
                "Email {} is already registered",
                params.email
            )));
        }

        if params.user_type == UserType::Supplier
            && user_repo
                .supplier_name_exists(&params.full_name, None)
                .await?
        {
            return Err(AppError::Conflict(format!(
                "Supplier {} already exists",
                params.full_name
            )));
        }

        let avatar = params.avatar.take();
        if let Some(temp) = &avatar {
            self.storage.check_temp(Folder::Users, temp).await?;
        }
        let license = params.license.take();
        if let Some(temp) = &license {
            self.storage.check_temp(Folder::Licenses, temp).await?;
        }
        params.password = None;
        params.verified = false;
        params.expire_at = None;

        let mut user = user_repo.create(params).await?;

        if let Some(temp) = avatar {
            let name = self.storage.promote(Folder::Users, &temp, user.id).await?;
            user_repo.set_avatar(user.id, Some(name.clone())).await?;
            user.avatar = Some(name);
        }

        if let Some(temp) = license {
            let name = self
                .storage
                .promote(Folder::Licenses, &temp, user.id)
                .await?;
            user_repo.set_license(user.id, Some(name.clone())).await?;
            user.license = Some(name);
        }

        AuthService::new(self.db, self.mailer, self.config)
            .send_token_link(&user, TokenLink::Activate, AuthService::app_for(&user))
            .await?;

        tracing::info!(
            "User {} created {} account {}",
            creator.id,
            user.user_type,
            user.id
        );

        Ok(user)
    }

    /// Updates a profile. Type, blacklist and pay-later flags are only changed by admins.
    pub async fn update(
        &self,
        caller: &User,
        mut params: UpdateUserParams,
    ) -> Result<Option<User>, AppError> {
        params.full_name = validate_name("Full name", &params.full_name)?;

        if !caller.is_admin() {
            params.user_type = None;
            params.blacklisted = None;
            params.pay_later = None;
        }

        UserRepository::new(self.db).update(params).await
    }

    pub async fn set_email_notifications(&self, user_id: i32, enabled: bool) -> Result<(), AppError> {
        Ok(UserRepository::new(self.db)
            .set_email_notifications(user_id, enabled)
            .await?)
    }

    pub async fn set_language(&self, user_id: i32, language: &str) -> Result<(), AppError> {
        let language = validate_name("Language", language)?;
        Ok(UserRepository::new(self.db)
            .set_language(user_id, language.to_lowercase())
            .await?)
    }

    /// Searches accounts visible to the caller.
    ///
    /// Suppliers only see customers that booked one of their cars. The caller is
    /// never part of the results.
    pub async fn search(
        &self,
        caller: &User,
        mut params: UserSearchParams,
    ) -> Result<PaginatedUsers, AppError> {
        if !caller.is_admin() {
            params.user_types = vec![UserType::User];
            params.customers_of_supplier = Some(caller.id);
        }
        params.exclude_user_id = Some(caller.id);

        let page = params.page;
        let per_page = params.per_page;
        let (users, total) = UserRepository::new(self.db).search(params).await?;

        Ok(PaginatedUsers {
            users,
            total,
            page,
            per_page,
            total_pages: page_count(total, per_page),
        })
    }

    /// Deletes accounts with everything they own. See [`delete_accounts`].
    pub async fn delete_many(&self, ids: Vec<i32>) -> Result<u64, AppError> {
        delete_accounts(self.db, self.storage, ids).await
    }

    /// Stores an avatar uploaded before its account exists.
    pub async fn upload_temp_avatar(&self, original_name: &str, bytes: &[u8]) -> Result<String, AppError> {
        self.storage
            .save_temp(Folder::Users, original_name, bytes)
            .await
    }

    /// Replaces the avatar of an account.
    ///
    /// # Returns
    /// - `Ok(Some(name))` - Stored file name
    /// - `Ok(None)` - No account with that id
    pub async fn update_avatar(
        &self,
        user_id: i32,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<Option<String>, AppError> {
        let user_repo = UserRepository::new(self.db);
        let Some(user) = user_repo.find_by_id(user_id).await? else {
            return Ok(None);
        };

        let name = self
            .storage
            .replace(
                Folder::Users,
                user.id,
                original_name,
                bytes,
                user.avatar.as_deref(),
            )
            .await?;
        user_repo.set_avatar(user.id, Some(name.clone())).await?;

        Ok(Some(name))
    }

    /// Removes the avatar of an account. Returns false for unknown accounts.
    pub async fn delete_avatar(&self, user_id: i32) -> Result<bool, AppError> {
        let user_repo = UserRepository::new(self.db);
        let Some(user) = user_repo.find_by_id(user_id).await? else {
            return Ok(false);
        };

        if let Some(avatar) = &user.avatar {
            self.storage.delete(Folder::Users, avatar).await?;
        }
        user_repo.set_avatar(user.id, None).await?;

        Ok(true)
    }

    pub async fn delete_temp_avatar(&self, name: &str) -> Result<(), AppError> {
        self.storage.delete_temp(Folder::Users, name).await
    }

    pub async fn upload_temp_license(&self, original_name: &str, bytes: &[u8]) -> Result<String, AppError> {
        self.storage
            .save_temp(Folder::Licenses, original_name, bytes)
            .await
    }

    /// Replaces the driver license document of an account.
    pub async fn update_license(
        &self,
        user_id: i32,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<Option<String>, AppError> {
        let user_repo = UserRepository::new(self.db);
        let Some(user) = user_repo.find_by_id(user_id).await? else {
            return Ok(None);
        };

        let name = self
            .storage
            .replace(
                Folder::Licenses,
                user.id,
                original_name,
                bytes,
                user.license.as_deref(),
            )
            .await?;
        user_repo.set_license(user.id, Some(name.clone())).await?;

        Ok(Some(name))
    }

    pub async fn delete_license(&self, user_id: i32) -> Result<bool, AppError> {
        let user_repo = UserRepository::new(self.db);
        let Some(user) = user_repo.find_by_id(user_id).await? else {
            return Ok(false);
        };

        if let Some(license) = &user.license {
            self.storage.delete(Folder::Licenses, license).await?;
        }
        user_repo.set_license(user.id, None).await?;

        Ok(true)
    }

    pub async fn delete_temp_license(&self, name: &str) -> Result<(), AppError> {
        self.storage.delete_temp(Folder::Licenses, name).await
    }

    pub async fn get_push_token(&self, user_id: i32) -> Result<Option<String>, AppError> {
        Ok(PushTokenRepository::new(self.db).get(user_id).await?)
    }

    /// Stores the device token of a user, replacing the previous one.
    pub async fn set_push_token(&self, user_id: i32, token: String) -> Result<(), AppError> {
        if !is_push_token(&token) {
            return Err(AppError::BadRequest(format!("Invalid push token: {}", token)));
        }

        Ok(PushTokenRepository::new(self.db)
            .upsert(user_id, token)
            .await?)
    }

    pub async fn delete_push_token(&self, user_id: i32) -> Result<bool, AppError> {
        Ok(PushTokenRepository::new(self.db).delete(user_id).await?)
    }

    /// Forwards a contact form message to the admin mailbox.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - No admin mailbox configured
    pub async fn contact(&self, from: &str, subject: &str, message: &str) -> Result<(), AppError> {
        let from = validate_email(from)?;
        let subject = validate_name("Subject", subject)?;
        let Some(admin_email) = &self.config.admin_email else {
            return Err(AppError::NotFound(
                "No contact address configured".to_string(),
            ));
        };

        let paragraphs: Vec<String> = message
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(escape_html)
            .collect();

        self.mailer
            .send(&Email {
                to: admin_email.clone(),
                subject,
                html: layout(&format!("Message from {}:", escape_html(&from)), &paragraphs),
            })
            .await
    }
}

/// Deletes accounts with everything they own.
///
/// Cars and bookings follow through foreign keys; additional drivers of the deleted
/// bookings, avatars, licenses and car images are removed here. File removal is
/// best effort.
///
/// # Returns
/// - `Ok(u64)` - Number of deleted accounts
pub async fn delete_accounts(
    db: &DatabaseConnection,
    storage: &FileStorage,
    ids: Vec<i32>,
) -> Result<u64, AppError> {
    let users = UserRepository::new(db).find_by_ids(ids).await?;
    if users.is_empty() {
        return Ok(0);
    }

    let ids: Vec<i32> = users.iter().map(|u| u.id).collect();

    let car_repo = CarRepository::new(db);
    let mut car_images = Vec::new();
    for user in users.iter().filter(|u| u.is_supplier()) {
        car_images.extend(car_repo.get_images_by_supplier(user.id).await?);
    }

    let booking_repo = BookingRepository::new(db);
    let additional_drivers = booking_repo
        .additional_driver_ids_of_users(ids.clone())
        .await?;

    let deleted = UserRepository::new(db).delete_many(ids).await?;
    booking_repo
        .delete_additional_drivers(additional_drivers)
        .await?;

    let mut files = Vec::new();
    for user in &users {
        if let Some(avatar) = &user.avatar {
            files.push((Folder::Users, avatar.as_str()));
        }
        if let Some(license) = &user.license {
            files.push((Folder::Licenses, license.as_str()));
        }
    }
    files.extend(car_images.iter().map(|image| (Folder::Cars, image.as_str())));

    for (folder, name) in files {
        if let Err(e) = storage.delete(folder, name).await {
            tracing::warn!("Failed to delete {}/{}: {}", folder.as_str(), name, e);
        }
    }

    tracing::info!("Deleted {} accounts", deleted);

    Ok(deleted)
}
