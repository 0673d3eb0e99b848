//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing admin, supplier and customer
//! accounts. It handles account creation, profile and settings updates, activation,
//! searches and the purge of expired unverified accounts, converting entity models to
//! domain models at the boundary.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::enums::UserType,
    server::{
        error::AppError,
        model::user::{
            CreateUserParams, UpdateSupplierParams, UpdateUserParams, User, UserSearchParams,
        },
    },
};

/// Repository providing database operations for user accounts.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new account.
    ///
    /// # Arguments
    /// - `params` - Account fields; the email must already be normalized
    ///
    /// # Returns
    /// - `Ok(User)` - The created account
    /// - `Err(AppError::DbErr)` - Database error, including a duplicate email
    pub async fn create(&self, params: CreateUserParams) -> Result<User, AppError> {
        let now = Utc::now();
        let entity = entity::user::ActiveModel {
            user_type: ActiveValue::Set(params.user_type.as_str().to_string()),
            full_name: ActiveValue::Set(params.full_name),
            email: ActiveValue::Set(params.email),
            phone: ActiveValue::Set(params.phone),
            password: ActiveValue::Set(params.password),
            birth_date: ActiveValue::Set(params.birth_date),
            verified: ActiveValue::Set(params.verified),
            verified_at: ActiveValue::Set(params.verified.then_some(now)),
            active: ActiveValue::Set(true),
            language: ActiveValue::Set(params.language),
            enable_email_notifications: ActiveValue::Set(true),
            avatar: ActiveValue::Set(params.avatar),
            bio: ActiveValue::Set(params.bio),
            location: ActiveValue::Set(params.location),
            blacklisted: ActiveValue::Set(false),
            pay_later: ActiveValue::Set(params.pay_later),
            license_required: ActiveValue::Set(params.license_required),
            license: ActiveValue::Set(params.license),
            minimum_rental_days: ActiveValue::Set(params.minimum_rental_days),
            price_change_rate: ActiveValue::Set(params.price_change_rate),
            supplier_car_limit: ActiveValue::Set(params.supplier_car_limit),
            notify_admin_on_new_car: ActiveValue::Set(params.notify_admin_on_new_car),
            expire_at: ActiveValue::Set(params.expire_at),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds an account by id.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Account found
    /// - `Ok(None)` - No account with that id
    /// - `Err(AppError)` - Database error or unknown stored user type
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        entity::prelude::User::find_by_id(id)
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Finds an account by its normalized email address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Loads several accounts at once; unknown ids are skipped.
    pub async fn find_by_ids(&self, ids: Vec<i32>) -> Result<Vec<User>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect()
    }

    /// Checks if any admin account exists.
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::UserType.eq(UserType::Admin.as_str()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets every admin account, ordered by name.
    pub async fn get_admins(&self) -> Result<Vec<User>, AppError> {
        entity::prelude::User::find()
            .filter(entity::user::Column::UserType.eq(UserType::Admin.as_str()))
            .order_by_asc(entity::user::Column::FullName)
            .all(self.db)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect()
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks whether a supplier other than `exclude_id` already uses `full_name`.
    pub async fn supplier_name_exists(
        &self,
        full_name: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::User::find()
            .filter(entity::user::Column::UserType.eq(UserType::Supplier.as_str()))
            .filter(entity::user::Column::FullName.eq(full_name));

        if let Some(id) = exclude_id {
            query = query.filter(entity::user::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Updates profile fields. Optional settings left as `None` keep their value.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - The updated account
    /// - `Ok(None)` - No account with that id
    pub async fn update(&self, params: UpdateUserParams) -> Result<Option<User>, AppError> {
        let Some(existing) = entity::prelude::User::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = existing.into();
        active.full_name = ActiveValue::Set(params.full_name);
        active.phone = ActiveValue::Set(params.phone);
        active.birth_date = ActiveValue::Set(params.birth_date);
        active.bio = ActiveValue::Set(params.bio);
        active.location = ActiveValue::Set(params.location);
        if let Some(language) = params.language {
            active.language = ActiveValue::Set(language);
        }
        if let Some(enabled) = params.enable_email_notifications {
            active.enable_email_notifications = ActiveValue::Set(enabled);
        }
        if let Some(user_type) = params.user_type {
            active.user_type = ActiveValue::Set(user_type.as_str().to_string());
        }
        if let Some(blacklisted) = params.blacklisted {
            active.blacklisted = ActiveValue::Set(blacklisted);
        }
        if let Some(pay_later) = params.pay_later {
            active.pay_later = ActiveValue::Set(pay_later);
        }

        let entity = active.update(self.db).await?;
        Ok(Some(User::from_entity(entity)?))
    }

    /// Updates the supplier specific settings of an account.
    pub async fn update_supplier(
        &self,
        params: UpdateSupplierParams,
    ) -> Result<Option<User>, AppError> {
        let Some(existing) = entity::prelude::User::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = existing.into();
        active.full_name = ActiveValue::Set(params.full_name);
        active.phone = ActiveValue::Set(params.phone);
        active.location = ActiveValue::Set(params.location);
        active.bio = ActiveValue::Set(params.bio);
        active.pay_later = ActiveValue::Set(params.pay_later);
        active.license_required = ActiveValue::Set(params.license_required);
        active.minimum_rental_days = ActiveValue::Set(params.minimum_rental_days);
        active.price_change_rate = ActiveValue::Set(params.price_change_rate);
        active.supplier_car_limit = ActiveValue::Set(params.supplier_car_limit);
        active.notify_admin_on_new_car = ActiveValue::Set(params.notify_admin_on_new_car);

        let entity = active.update(self.db).await?;
        Ok(Some(User::from_entity(entity)?))
    }

    /// Replaces the password hash of an account.
    pub async fn set_password(&self, id: i32, password_hash: String) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::Password, Expr::value(password_hash))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Marks an account as verified and clears its expiry.
    ///
    /// When `password_hash` is given the password is set at the same time, which is
    /// how invited accounts are activated.
    pub async fn mark_verified(
        &self,
        id: i32,
        password_hash: Option<String>,
    ) -> Result<(), DbErr> {
        let mut update = entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::Verified, Expr::value(true))
            .col_expr(entity::user::Column::VerifiedAt, Expr::value(Utc::now()))
            .col_expr(entity::user::Column::Active, Expr::value(true))
            .col_expr(
                entity::user::Column::ExpireAt,
                Expr::value(Option::<DateTime<Utc>>::None),
            );

        if let Some(hash) = password_hash {
            update = update.col_expr(entity::user::Column::Password, Expr::value(hash));
        }

        update.exec(self.db).await?;
        Ok(())
    }

    pub async fn set_email_notifications(&self, id: i32, enabled: bool) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::EnableEmailNotifications,
                Expr::value(enabled),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Keeps an unverified account from being purged, e.g. once its booking is paid.
    pub async fn clear_expiry(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::ExpireAt,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn set_language(&self, id: i32, language: String) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::Language, Expr::value(language))
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn set_avatar(&self, id: i32, avatar: Option<String>) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::Avatar, Expr::value(avatar))
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn set_license(&self, id: i32, license: Option<String>) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::License, Expr::value(license))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Searches accounts, newest first.
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users of the requested page and the total number of matches
    pub async fn search(&self, params: UserSearchParams) -> Result<(Vec<User>, u64), AppError> {
        let mut query = entity::prelude::User::find();

        if !params.user_types.is_empty() {
            let types: Vec<&str> = params.user_types.iter().map(|t| t.as_str()).collect();
            query = query.filter(entity::user::Column::UserType.is_in(types));
        }

        if let Some(keyword) = params.keyword.as_deref() {
            query = query.filter(
                Condition::any()
                    .add(entity::user::Column::FullName.contains(keyword))
                    .add(entity::user::Column::Email.contains(keyword)),
            );
        }

        if let Some(supplier_id) = params.customers_of_supplier {
            let driver_ids: Vec<i32> = entity::prelude::Booking::find()
                .select_only()
                .column(entity::booking::Column::DriverId)
                .filter(entity::booking::Column::SupplierId.eq(supplier_id))
                .distinct()
                .into_tuple()
                .all(self.db)
                .await?;
            query = query.filter(entity::user::Column::Id.is_in(driver_ids));
        }

        if let Some(exclude) = params.exclude_user_id {
            query = query.filter(entity::user::Column::Id.ne(exclude));
        }

        let paginator = query
            .order_by_desc(entity::user::Column::CreatedAt)
            .order_by_desc(entity::user::Column::Id)
            .paginate(self.db, params.per_page.max(1));

        let total = paginator.num_items().await?;
        let users = paginator
            .fetch_page(params.page)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((users, total))
    }

    /// Gets suppliers ordered by name with the number of cars each owns.
    ///
    /// # Returns
    /// - `Ok((suppliers, total))` - Suppliers with car counts and total number of matches
    pub async fn get_suppliers_paginated(
        &self,
        keyword: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<(User, u64)>, u64), AppError> {
        let mut query = entity::prelude::User::find()
            .filter(entity::user::Column::UserType.eq(UserType::Supplier.as_str()));

        if let Some(keyword) = keyword {
            query = query.filter(entity::user::Column::FullName.contains(keyword));
        }

        let paginator = query
            .order_by_asc(entity::user::Column::FullName)
            .paginate(self.db, per_page.max(1));

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        let mut suppliers = Vec::with_capacity(entities.len());
        for entity in entities {
            let car_count = entity::prelude::Car::find()
                .filter(entity::car::Column::SupplierId.eq(entity.id))
                .count(self.db)
                .await?;
            suppliers.push((User::from_entity(entity)?, car_count));
        }

        Ok((suppliers, total))
    }

    /// Gets every supplier ordered by name.
    pub async fn get_all_suppliers(&self) -> Result<Vec<User>, AppError> {
        entity::prelude::User::find()
            .filter(entity::user::Column::UserType.eq(UserType::Supplier.as_str()))
            .order_by_asc(entity::user::Column::FullName)
            .all(self.db)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect()
    }

    /// Deletes accounts by id. Tokens, cars and bookings follow through foreign keys.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of deleted accounts
    pub async fn delete_many(&self, ids: Vec<i32>) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::User::delete_many()
            .filter(entity::user::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Ids of unverified accounts whose activation deadline passed before `now`.
    pub async fn find_expired_unverified_ids(&self, now: DateTime<Utc>) -> Result<Vec<i32>, DbErr> {
        entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::Id)
            .filter(entity::user::Column::Verified.eq(false))
            .filter(entity::user::Column::ExpireAt.is_not_null())
            .filter(entity::user::Column::ExpireAt.lt(now))
            .into_tuple()
            .all(self.db)
            .await
    }
}
