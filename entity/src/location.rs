use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "location")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub country_id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image: Option<String>,
    pub supplier_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::country::Entity",
        from = "Column::CountryId",
        to = "super::country::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Country,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::SupplierId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Supplier,
    #[sea_orm(has_many = "super::parking_spot::Entity")]
    ParkingSpot,
    #[sea_orm(has_many = "super::car_location::Entity")]
    CarLocation,
}

impl Related<super::country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Country.def()
    }
}

impl Related<super::parking_spot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingSpot.def()
    }
}

impl Related<super::car_location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarLocation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
