use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub supplier_id: i32,
    #[sea_orm(indexed)]
    pub car_id: i32,
    #[sea_orm(indexed)]
    pub driver_id: i32,
    pub pickup_location_id: i32,
    pub drop_off_location_id: i32,
    pub from_date: DateTimeUtc,
    pub to_date: DateTimeUtc,
    pub status: String,
    pub cancellation: bool,
    pub amendments: bool,
    pub theft_protection: bool,
    pub collision_damage_waiver: bool,
    pub full_insurance: bool,
    pub additional_driver: bool,
    pub additional_driver_id: Option<i32>,
    pub cancel_request: bool,
    pub price: f64,
    #[sea_orm(indexed)]
    pub session_id: Option<String>,
    pub payment_intent_id: Option<String>,
    pub customer_id: Option<String>,
    #[sea_orm(indexed)]
    pub expire_at: Option<DateTimeUtc>,
    pub is_deposit: bool,
    pub is_payed_in_full: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::SupplierId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Supplier,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::DriverId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Driver,
    #[sea_orm(
        belongs_to = "super::car::Entity",
        from = "Column::CarId",
        to = "super::car::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Car,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::PickupLocationId",
        to = "super::location::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    PickupLocation,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::DropOffLocationId",
        to = "super::location::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    DropOffLocation,
    #[sea_orm(
        belongs_to = "super::additional_driver::Entity",
        from = "Column::AdditionalDriverId",
        to = "super::additional_driver::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    AdditionalDriver,
}

impl Related<super::car::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Car.def()
    }
}

impl Related<super::additional_driver::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdditionalDriver.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
