use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "country")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub symbol: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_symbol(symbol: &str) -> Result<(), errors::ModelError> {
    let s = symbol.trim();
    if s.is_empty() || s.len() > 8 {
        return Err(errors::ModelError::Validation("country symbol must be 1..=8 characters".into()));
    }
    Ok(())
}
