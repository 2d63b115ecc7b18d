use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::domain::ManageOfficeInput;
use super::reconcile;
use super::repository::OfficeRepository;
use super::validation;
use crate::cancel::guarded;
use crate::entities::{LocatedOffice, Office, OfficeZone, ParkingZone};
use crate::envelope::Envelope;
use crate::errors::ServiceError;
use crate::views::OfficeModel;

const SAVE_FAILED: &str = "Error occurred while saving changes to database.";
const DELETE_DENIED: &str = "You're not authorized to delete offices";

pub struct OfficeService<R: OfficeRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: OfficeRepository + ?Sized> OfficeService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create (nil id) or update an office.
    ///
    /// All rule violations are collected into one 400 envelope, in the order:
    /// zones present, zone names distinct, city known, address free. Updates
    /// then require the office to exist and the caller to be its creator.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::office::{OfficeService, domain::{ManageOfficeInput, OfficeZoneInput}};
    /// use service::storage::memory::MemoryStore;
    /// use tokio_util::sync::CancellationToken;
    /// let store = Arc::new(MemoryStore::default());
    /// tokio_test::block_on(store.seed_city("Vilnius", "Lithuania", "LT"));
    /// let svc = OfficeService::new(store);
    /// let input = ManageOfficeInput {
    ///     id: uuid::Uuid::nil(),
    ///     address: "Gedimino 1".into(),
    ///     post_code: "01103".into(),
    ///     office_map_url: None,
    ///     city: "Vilnius".into(),
    ///     office_zones: vec![OfficeZoneInput { name: "A".into(), desks: 10 }],
    ///     parking_zones: vec![],
    ///     creator_id: uuid::Uuid::new_v4(),
    /// };
    /// let env = tokio_test::block_on(svc.upsert(input, &CancellationToken::new())).unwrap();
    /// assert_eq!(env.code, 200);
    /// assert_eq!(env.data.unwrap().office_zones.len(), 1);
    /// ```
    #[instrument(skip(self, input, cancel), fields(office_id = %input.id, creator_id = %input.creator_id))]
    pub async fn upsert(
        &self,
        input: ManageOfficeInput,
        cancel: &CancellationToken,
    ) -> Result<Envelope<OfficeModel>, ServiceError> {
        let mut errors = Vec::new();
        errors.extend(validation::zones_present(&input.office_zones));
        errors.extend(validation::zone_names_distinct(&input.office_zones));

        let located = guarded(cancel, self.repo.locate_city(&input.city)).await?;
        if located.is_none() {
            errors.push(format!("Can not find city {}.", input.city));
        }
        let except = (!input.is_create()).then_some(input.id);
        if guarded(cancel, self.repo.address_taken(&input.address, except)).await? {
            errors.push(format!("Address {} already taken.", input.address));
        }

        let (city, country) = match located {
            Some(found) if errors.is_empty() => found,
            _ => {
                warn!(?errors, "office rejected");
                return Ok(Envelope::bad_request(errors));
            }
        };

        if input.is_create() {
            let office_id = Uuid::new_v4();
            let office = Office {
                id: office_id,
                office_zones: input
                    .office_zones
                    .iter()
                    .map(|z| OfficeZone { id: Uuid::new_v4(), name: z.name.clone(), desks: z.desks, office_id })
                    .collect(),
                parking_zones: input
                    .parking_zones
                    .iter()
                    .map(|z| ParkingZone { id: Uuid::new_v4(), name: z.name.clone(), spaces: z.spaces, office_id })
                    .collect(),
                address: input.address,
                post_code: input.post_code,
                office_map_url: input.office_map_url,
                city_id: city.id,
                creator_id: input.creator_id,
            };
            if let Err(e) = guarded(cancel, self.repo.insert_office(&office)).await {
                return e.into_save_failure(SAVE_FAILED);
            }
            info!(office_id = %office.id, "office_created");
            return Ok(Envelope::ok(OfficeModel::from(&LocatedOffice { office, city, country })));
        }

        let Some(existing) = guarded(cancel, self.repo.find_office(input.id)).await? else {
            return Ok(Envelope::not_found(input.id));
        };
        if existing.office.creator_id != input.creator_id {
            let error = format!("User with {} Id can not edit this office!", input.creator_id);
            warn!(owner = %existing.office.creator_id, %error, "office edit by non-creator");
            return Ok(Envelope::forbidden([error]));
        }

        let current = existing.office;
        let office = Office {
            id: current.id,
            office_zones: reconcile::office_zones(current.id, &current.office_zones, &input.office_zones),
            parking_zones: reconcile::parking_zones(current.id, &current.parking_zones, &input.parking_zones),
            address: input.address,
            post_code: input.post_code,
            office_map_url: input.office_map_url,
            city_id: city.id,
            creator_id: current.creator_id,
        };
        if let Err(e) = guarded(cancel, self.repo.update_office(&office)).await {
            return e.into_save_failure(SAVE_FAILED);
        }
        info!(office_id = %office.id, "office_updated");
        Ok(Envelope::ok(OfficeModel::from(&LocatedOffice { office, city, country })))
    }

    #[instrument(skip(self, cancel), fields(office_id = %id, caller = %creator_id))]
    pub async fn delete(
        &self,
        id: Uuid,
        creator_id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<Envelope<()>, ServiceError> {
        let Some(existing) = guarded(cancel, self.repo.find_office(id)).await? else {
            return Ok(Envelope::not_found(id));
        };
        if existing.office.creator_id != creator_id {
            warn!(owner = %existing.office.creator_id, error = DELETE_DENIED, "office delete by non-creator");
            return Ok(Envelope::bad_request([DELETE_DENIED]));
        }
        if let Err(e) = guarded(cancel, self.repo.delete_office(id)).await {
            return e.into_save_failure(SAVE_FAILED);
        }
        info!("office_deleted");
        Ok(Envelope::ok_empty())
    }

    pub async fn get(&self, id: Uuid, cancel: &CancellationToken) -> Result<Envelope<OfficeModel>, ServiceError> {
        Ok(match guarded(cancel, self.repo.find_office(id)).await? {
            Some(found) => Envelope::ok(OfficeModel::from(&found)),
            None => Envelope::not_found(id),
        })
    }

    pub async fn list(&self, cancel: &CancellationToken) -> Result<Envelope<Vec<OfficeModel>>, ServiceError> {
        let offices = guarded(cancel, self.repo.list_offices()).await?;
        Ok(Envelope::ok(offices.iter().map(OfficeModel::from).collect()))
    }
}
