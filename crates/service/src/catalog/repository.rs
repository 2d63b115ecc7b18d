use async_trait::async_trait;

use crate::entities::{City, Country};
use crate::errors::ServiceError;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_countries(&self) -> Result<Vec<Country>, ServiceError>;
    /// Cities with their country, optionally restricted to one country name.
    async fn list_cities(&self, country: Option<&str>) -> Result<Vec<(City, Country)>, ServiceError>;
    async fn find_country_by_name(&self, name: &str) -> Result<Option<Country>, ServiceError>;
    async fn find_city(&self, name: &str, country_id: uuid::Uuid) -> Result<Option<City>, ServiceError>;
    /// Stores `city`, first creating `new_country` when given. One transaction.
    async fn insert_city(&self, city: &City, new_country: Option<&Country>) -> Result<(), ServiceError>;
}
