use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{app_user, office, office_zone, parking_zone};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub date: DateTimeWithTimeZone,
    /// Calendar day of `date` (UTC); the occupancy key.
    pub day: Date,
    pub office_id: Uuid,
    pub office_zone_id: Uuid,
    pub office_desk: String,
    pub parking_zone_id: Option<Uuid>,
    pub parking_space: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Office,
    OfficeZone,
    ParkingZone,
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Office => Entity::belongs_to(office::Entity)
                .from(Column::OfficeId)
                .to(office::Column::Id)
                .into(),
            Relation::OfficeZone => Entity::belongs_to(office_zone::Entity)
                .from(Column::OfficeZoneId)
                .to(office_zone::Column::Id)
                .into(),
            Relation::ParkingZone => Entity::belongs_to(parking_zone::Entity)
                .from(Column::ParkingZoneId)
                .to(parking_zone::Column::Id)
                .into(),
            Relation::User => Entity::belongs_to(app_user::Entity)
                .from(Column::UserId)
                .to(app_user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Day component used for occupancy checks.
pub fn day_of(date: DateTime<Utc>) -> NaiveDate {
    date.date_naive()
}
