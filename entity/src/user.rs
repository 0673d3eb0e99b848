use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_type: String,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub birth_date: Option<Date>,
    pub verified: bool,
    pub verified_at: Option<DateTimeUtc>,
    pub active: bool,
    pub language: String,
    pub enable_email_notifications: bool,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub blacklisted: bool,
    pub pay_later: bool,
    pub license_required: bool,
    pub license: Option<String>,
    pub minimum_rental_days: Option<i32>,
    pub price_change_rate: Option<f64>,
    pub supplier_car_limit: Option<i32>,
    pub notify_admin_on_new_car: bool,
    #[sea_orm(indexed)]
    pub expire_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::car::Entity")]
    Car,
    #[sea_orm(has_many = "super::notification::Entity")]
    Notification,
    #[sea_orm(has_one = "super::notification_counter::Entity")]
    NotificationCounter,
    #[sea_orm(has_many = "super::token::Entity")]
    Token,
    #[sea_orm(has_one = "super::push_token::Entity")]
    PushToken,
}

impl Related<super::car::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Car.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notification.def()
    }
}

impl Related<super::token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Token.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
