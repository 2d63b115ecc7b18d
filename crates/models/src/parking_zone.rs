use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, office};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parking_zone")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub spaces: i32,
    pub office_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Office,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Office => Entity::belongs_to(office::Entity)
                .from(Column::OfficeId)
                .to(office::Column::Id)
                .into(),
        }
    }
}

impl Related<office::Entity> for Entity {
    fn to() -> RelationDef { Relation::Office.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_spaces(spaces: i32) -> Result<(), errors::ModelError> {
    if spaces < 0 {
        return Err(errors::ModelError::Validation("spaces must not be negative".into()));
    }
    Ok(())
}
