use sea_orm::entity::prelude::*;

use crate::models::FieldStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fields")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub location: String,
    pub address: Option<String>,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price_per_booking: Decimal,
    pub operating_hours: String,
    #[sea_orm(column_type = "Decimal(Some((2, 1)))")]
    pub rating: Decimal,
    pub status: FieldStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::OwnerId",
        to = "super::profiles::Column::Id"
    )]
    Profiles,
    #[sea_orm(has_many = "super::field_images::Entity")]
    FieldImages,
    #[sea_orm(has_many = "super::field_amenities::Entity")]
    FieldAmenities,
    #[sea_orm(has_many = "super::bookings::Entity")]
    Bookings,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profiles.def()
    }
}

impl Related<super::field_images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FieldImages.def()
    }
}

impl Related<super::field_amenities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FieldAmenities.def()
    }
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
