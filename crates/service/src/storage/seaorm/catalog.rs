use async_trait::async_trait;
use models::{city, country};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};
use uuid::Uuid;

use super::SeaOrmStore;
use crate::catalog::repository::CatalogRepository;
use crate::entities::{City, Country};
use crate::errors::ServiceError;

#[async_trait]
impl CatalogRepository for SeaOrmStore {
    async fn list_countries(&self) -> Result<Vec<Country>, ServiceError> {
        let rows = country::Entity::find().order_by_asc(country::Column::Name).all(&self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_cities(&self, country_name: Option<&str>) -> Result<Vec<(City, Country)>, ServiceError> {
        let mut query = city::Entity::find().find_also_related(country::Entity);
        if let Some(name) = country_name {
            query = query.filter(country::Column::Name.eq(name));
        }
        let rows = query.order_by_asc(city::Column::Name).all(&self.db).await?;
        Ok(rows
            .into_iter()
            .filter_map(|(city, country)| country.map(|country| (city.into(), country.into())))
            .collect())
    }

    async fn find_country_by_name(&self, name: &str) -> Result<Option<Country>, ServiceError> {
        let row = country::Entity::find().filter(country::Column::Name.eq(name)).one(&self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn find_city(&self, name: &str, country_id: Uuid) -> Result<Option<City>, ServiceError> {
        let row = city::Entity::find()
            .filter(city::Column::Name.eq(name))
            .filter(city::Column::CountryId.eq(country_id))
            .one(&self.db)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn insert_city(&self, city: &City, new_country: Option<&Country>) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        if let Some(c) = new_country {
            country::validate_symbol(&c.symbol)?;
            country::ActiveModel { id: Set(c.id), name: Set(c.name.clone()), symbol: Set(c.symbol.clone()) }
                .insert(&txn)
                .await?;
        }
        city::ActiveModel { id: Set(city.id), name: Set(city.name.clone()), country_id: Set(city.country_id) }
            .insert(&txn)
            .await?;
        txn.commit().await?;
        Ok(())
    }
}
