//! Supplier listing models.

use crate::{
    model::supplier::{PaginatedSuppliersDto, SupplierDto},
    server::model::user::User,
};

/// Supplier account with the number of cars it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Supplier {
    pub user: User,
    pub car_count: u64,
}

impl Supplier {
    pub fn into_dto(self) -> SupplierDto {
        let user = self.user;
        SupplierDto {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            avatar: user.avatar,
            bio: user.bio,
            location: user.location,
            pay_later: user.pay_later,
            license_required: user.license_required,
            minimum_rental_days: user.minimum_rental_days,
            price_change_rate: user.price_change_rate,
            supplier_car_limit: user.supplier_car_limit,
            notify_admin_on_new_car: user.notify_admin_on_new_car,
            car_count: self.car_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedSuppliers {
    pub suppliers: Vec<Supplier>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedSuppliers {
    pub fn into_dto(self) -> PaginatedSuppliersDto {
        PaginatedSuppliersDto {
            suppliers: self.suppliers.into_iter().map(Supplier::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
