use sea_orm::DatabaseConnection;

use crate::server::{
    data::{car::CarRepository, user::UserRepository},
    error::AppError,
    model::{
        car::CarFilter,
        page_count,
        supplier::{PaginatedSuppliers, Supplier},
        user::{UpdateSupplierParams, User},
    },
    service::{storage::FileStorage, user::delete_accounts},
    util::validate::validate_name,
};

pub struct SupplierService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a FileStorage,
}

impl<'a> SupplierService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a FileStorage) -> Self {
        Self { db, storage }
    }

    /// Gets suppliers ordered by name with the number of cars each owns.
    pub async fn get_paginated(
        &self,
        keyword: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedSuppliers, AppError> {
        let (suppliers, total) = UserRepository::new(self.db)
            .get_suppliers_paginated(keyword, page, per_page)
            .await?;

        Ok(PaginatedSuppliers {
            suppliers: suppliers
                .into_iter()
                .map(|(user, car_count)| Supplier { user, car_count })
                .collect(),
            total,
            page,
            per_page,
            total_pages: page_count(total, per_page),
        })
    }

    pub async fn get_all(&self) -> Result<Vec<User>, AppError> {
        UserRepository::new(self.db).get_all_suppliers().await
    }

    /// Gets a supplier account; `None` for unknown ids and non-supplier accounts.
    pub async fn get(&self, id: i32) -> Result<Option<Supplier>, AppError> {
        let Some(user) = self.find_supplier(id).await? else {
            return Ok(None);
        };

        let car_count = CarRepository::new(self.db).count_by_supplier(id).await?;

        Ok(Some(Supplier { user, car_count }))
    }

    async fn find_supplier(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(User::is_supplier))
    }

    /// Suppliers with at least one available car at the pickup location matching
    /// the filter, with the number of such cars, ordered by name.
    pub async fn get_frontend_suppliers(
        &self,
        filter: &CarFilter,
        pickup_location_id: i32,
    ) -> Result<Vec<Supplier>, AppError> {
        let counts = CarRepository::new(self.db)
            .get_frontend_supplier_counts(filter, pickup_location_id)
            .await?;

        let ids = counts.iter().map(|(id, _)| *id).collect();
        let mut users = UserRepository::new(self.db).find_by_ids(ids).await?;
        users.sort_by(|a, b| a.full_name.cmp(&b.full_name));

        Ok(users
            .into_iter()
            .map(|user| {
                let car_count = counts
                    .iter()
                    .find(|(id, _)| *id == user.id)
                    .map(|(_, count)| *count)
                    .unwrap_or(0);
                Supplier { user, car_count }
            })
            .collect())
    }

    /// Updates supplier settings; `None` for unknown ids and non-supplier accounts.
    ///
    /// # Returns
    /// - `Err(AppError::Conflict)` - Another supplier has that name
    pub async fn update(&self, mut params: UpdateSupplierParams) -> Result<Option<User>, AppError> {
        params.full_name = validate_name("Supplier name", &params.full_name)?;

        if self.find_supplier(params.id).await?.is_none() {
            return Ok(None);
        }

        let repo = UserRepository::new(self.db);
        if repo
            .supplier_name_exists(&params.full_name, Some(params.id))
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Supplier {} already exists",
                params.full_name
            )));
        }

        repo.update_supplier(params).await
    }

    /// Deletes a supplier with its cars, their bookings and files.
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        if self.find_supplier(id).await?.is_none() {
            return Ok(false);
        }

        Ok(delete_accounts(self.db, self.storage, vec![id]).await? > 0)
    }

    pub async fn name_available(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, AppError> {
        Ok(!UserRepository::new(self.db)
            .supplier_name_exists(name.trim(), exclude_id)
            .await?)
    }
}
