use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{app_user, city, office_zone, parking_zone};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "office")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub address: String,
    pub post_code: String,
    pub office_map_url: Option<String>,
    pub city_id: Uuid,
    pub creator_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    City,
    Creator,
    OfficeZone,
    ParkingZone,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::City => Entity::belongs_to(city::Entity)
                .from(Column::CityId)
                .to(city::Column::Id)
                .into(),
            Relation::Creator => Entity::belongs_to(app_user::Entity)
                .from(Column::CreatorId)
                .to(app_user::Column::Id)
                .into(),
            Relation::OfficeZone => Entity::has_many(office_zone::Entity).into(),
            Relation::ParkingZone => Entity::has_many(parking_zone::Entity).into(),
        }
    }
}

impl Related<office_zone::Entity> for Entity {
    fn to() -> RelationDef { Relation::OfficeZone.def() }
}

impl Related<parking_zone::Entity> for Entity {
    fn to() -> RelationDef { Relation::ParkingZone.def() }
}

impl ActiveModelBehavior for ActiveModel {}
