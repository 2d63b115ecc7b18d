use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::domain::CreateCityInput;
use super::repository::CatalogRepository;
use crate::cancel::guarded;
use crate::entities::{City, Country};
use crate::envelope::Envelope;
use crate::errors::ServiceError;
use crate::views::{CityModel, CountryModel};

pub struct CatalogService<R: CatalogRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CatalogRepository + ?Sized> CatalogService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn countries(&self, cancel: &CancellationToken) -> Result<Envelope<Vec<CountryModel>>, ServiceError> {
        let countries = guarded(cancel, self.repo.list_countries()).await?;
        Ok(Envelope::ok(countries.iter().map(Into::into).collect()))
    }

    pub async fn cities(
        &self,
        country: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Envelope<Vec<CityModel>>, ServiceError> {
        let cities = guarded(cancel, self.repo.list_cities(country)).await?;
        Ok(Envelope::ok(cities.iter().map(|(city, country)| CityModel::new(city, country)).collect()))
    }

    /// Create a city, creating its country on first use.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::catalog::{CatalogService, domain::{CreateCityInput, CountryInput}};
    /// use service::storage::memory::MemoryStore;
    /// use tokio_util::sync::CancellationToken;
    /// let svc = CatalogService::new(Arc::new(MemoryStore::default()));
    /// let input = CreateCityInput { name: "Vilnius".into(), country: CountryInput { name: "Lithuania".into(), symbol: "LT".into() } };
    /// let env = tokio_test::block_on(svc.create_city(input, &CancellationToken::new())).unwrap();
    /// assert_eq!(env.code, 200);
    /// assert_eq!(env.data.unwrap().country.symbol, "LT");
    /// ```
    #[instrument(skip(self, input, cancel), fields(city = %input.name, country = %input.country.name))]
    pub async fn create_city(
        &self,
        input: CreateCityInput,
        cancel: &CancellationToken,
    ) -> Result<Envelope<CityModel>, ServiceError> {
        let fields = [&input.name, &input.country.name, &input.country.symbol];
        if fields.iter().any(|f| f.trim().is_empty()) {
            warn!(error = "Fill missing fields!", "city rejected");
            return Ok(Envelope::bad_request(["Fill missing fields!"]));
        }

        let existing = guarded(cancel, self.repo.find_country_by_name(&input.country.name)).await?;
        let (country, new_country) = match existing {
            Some(country) => {
                if guarded(cancel, self.repo.find_city(&input.name, country.id)).await?.is_some() {
                    warn!(error = "City already exists!", "city rejected");
                    return Ok(Envelope::bad_request(["City already exists!"]));
                }
                (country, false)
            }
            None => {
                let country = Country { id: Uuid::new_v4(), name: input.country.name, symbol: input.country.symbol };
                (country, true)
            }
        };

        let city = City { id: Uuid::new_v4(), name: input.name, country_id: country.id };
        let insert = self.repo.insert_city(&city, new_country.then_some(&country));
        if let Err(e) = guarded(cancel, insert).await {
            return e.into_save_failure("Error occurred while saving changes to database.");
        }
        info!(city_id = %city.id, "city_created");
        Ok(Envelope::ok(CityModel::new(&city, &country)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::CountryInput;
    use crate::storage::memory::MemoryStore;

    fn input(city: &str, country: &str) -> CreateCityInput {
        CreateCityInput { name: city.into(), country: CountryInput { name: country.into(), symbol: "XX".into() } }
    }

    #[tokio::test]
    async fn second_city_reuses_the_country() {
        let store = Arc::new(MemoryStore::default());
        let svc = CatalogService::new(store.clone());
        let token = CancellationToken::new();
        let a = svc.create_city(input("Kaunas", "Lithuania"), &token).await.unwrap();
        let b = svc.create_city(input("Vilnius", "Lithuania"), &token).await.unwrap();
        assert_eq!(a.data.unwrap().country.id, b.data.unwrap().country.id);

        let countries = svc.countries(&token).await.unwrap().data.unwrap();
        assert_eq!(countries.len(), 1);
        let cities = svc.cities(Some("Lithuania"), &token).await.unwrap().data.unwrap();
        assert_eq!(cities.len(), 2);
        let none = svc.cities(Some("Latvia"), &token).await.unwrap().data.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn duplicate_city_is_rejected() {
        let svc = CatalogService::new(Arc::new(MemoryStore::default()));
        let token = CancellationToken::new();
        svc.create_city(input("Riga", "Latvia"), &token).await.unwrap();
        let env = svc.create_city(input("Riga", "Latvia"), &token).await.unwrap();
        assert_eq!(env.code, 400);
        assert_eq!(env.errors(), ["City already exists!"]);
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let svc = CatalogService::new(Arc::new(MemoryStore::default()));
        let env = svc.create_city(input(" ", "Latvia"), &CancellationToken::new()).await.unwrap();
        assert_eq!(env.errors(), ["Fill missing fields!"]);
    }
}
