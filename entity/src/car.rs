use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "car")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub supplier_id: i32,
    pub name: String,
    pub minimum_age: i32,
    pub daily_price: f64,
    pub discounted_daily_price: Option<f64>,
    pub bi_weekly_price: Option<f64>,
    pub discounted_bi_weekly_price: Option<f64>,
    pub weekly_price: Option<f64>,
    pub discounted_weekly_price: Option<f64>,
    pub monthly_price: Option<f64>,
    pub discounted_monthly_price: Option<f64>,
    pub deposit: f64,
    pub available: bool,
    pub fully_booked: bool,
    pub coming_soon: bool,
    pub car_type: String,
    pub gearbox: String,
    pub aircon: bool,
    pub image: Option<String>,
    pub seats: i32,
    pub doors: i32,
    pub fuel_policy: String,
    pub mileage: i32,
    pub cancellation: f64,
    pub amendments: f64,
    pub theft_protection: f64,
    pub collision_damage_waiver: f64,
    pub full_insurance: f64,
    pub additional_driver: f64,
    pub range: String,
    /// Comma separated multimedia flags.
    pub multimedia: String,
    pub rating: Option<f64>,
    pub co2: Option<f64>,
    pub trips: i32,
    pub is_date_based_price: bool,
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
    #[sea_orm(has_many = "super::car_location::Entity")]
    CarLocation,
    #[sea_orm(has_many = "super::date_based_price::Entity")]
    DateBasedPrice,
    #[sea_orm(has_many = "super::booking::Entity")]
    Booking,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::car_location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarLocation.def()
    }
}

impl Related<super::date_based_price::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DateBasedPrice.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
