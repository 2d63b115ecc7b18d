use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::conflict::ConflictRule;
use super::domain::{Admission, ManageReservationInput};
use super::repository::ReservationRepository;
use crate::cancel::guarded;
use crate::entities::{LocatedOffice, OfficeZone, ParkingZone, Reservation};
use crate::envelope::Envelope;
use crate::errors::ServiceError;
use crate::views::ReservationModel;

const SEAT_TAKEN: &str = "This seat is already reserved.";
const ADD_FAILED: &str = "Can't add new reservation.";
const EDIT_FAILED: &str = "Can't edit reservation.";
const DELETE_FAILED: &str = "Error while deleting reservation.";
const DELETE_DENIED: &str = "Can not delete not your booking!";

/// Office, zone and optional parking zone a booking refers to.
struct Target {
    office: LocatedOffice,
    zone: OfficeZone,
    parking: Option<ParkingZone>,
}

pub struct ReservationService<R: ReservationRepository + ?Sized> {
    repo: Arc<R>,
    rule: ConflictRule,
}

impl<R: ReservationRepository + ?Sized> ReservationService<R> {
    pub fn new(repo: Arc<R>, rule: ConflictRule) -> Self { Self { repo, rule } }

    /// Resolves the referenced office and zones. Every missing reference is
    /// reported, in the order office, office zone, parking zone.
    async fn resolve(
        &self,
        input: &ManageReservationInput,
        cancel: &CancellationToken,
    ) -> Result<Result<Target, Vec<String>>, ServiceError> {
        let office = guarded(cancel, self.repo.load_office(input.office_id)).await?;
        let zone = guarded(cancel, self.repo.load_office_zone(input.office_zone_id)).await?;
        let parking = match input.parking_zone_id {
            Some(id) => Some(guarded(cancel, self.repo.load_parking_zone(id)).await?),
            None => None,
        };

        let mut errors = Vec::new();
        if office.is_none() {
            errors.push(format!("Office with id: {} does not exist.", input.office_id));
        }
        if zone.is_none() {
            errors.push(format!("OfficeZone with id: {} does not exist.", input.office_zone_id));
        }
        if let (Some(id), Some(None)) = (input.parking_zone_id, &parking) {
            errors.push(format!("ParkingZone with id: {id} does not exist."));
        }

        Ok(match (office, zone) {
            (Some(office), Some(zone)) if errors.is_empty() => Ok(Target { office, zone, parking: parking.flatten() }),
            _ => Err(errors),
        })
    }

    /// Create (nil id) or update a reservation.
    ///
    /// Creation is refused when the seat is occupied under the configured
    /// [`ConflictRule`]; updates are limited to the booking's owner and do
    /// not re-check occupancy.
    #[instrument(skip(self, input, cancel), fields(reservation_id = %input.id, user_id = %input.user_id))]
    pub async fn upsert(
        &self,
        input: ManageReservationInput,
        cancel: &CancellationToken,
    ) -> Result<Envelope<ReservationModel>, ServiceError> {
        let target = match self.resolve(&input, cancel).await? {
            Ok(target) => target,
            Err(errors) => {
                warn!(?errors, "reservation rejected");
                return Ok(Envelope::bad_request(errors));
            }
        };

        if input.is_create() {
            let reservation = Reservation {
                id: Uuid::new_v4(),
                date: input.date,
                office_id: input.office_id,
                office_zone_id: input.office_zone_id,
                office_desk: input.office_desk,
                parking_zone_id: input.parking_zone_id,
                parking_space: input.parking_space,
                user_id: input.user_id,
            };
            match guarded(cancel, self.repo.insert_if_vacant(&reservation, self.rule)).await {
                Ok(Admission::Inserted) => {}
                Ok(Admission::Occupied) => {
                    warn!(desk = %reservation.office_desk, error = SEAT_TAKEN, "seat occupied");
                    return Ok(Envelope::bad_request([SEAT_TAKEN]));
                }
                Err(e) => return e.into_save_failure(ADD_FAILED),
            }
            info!(reservation_id = %reservation.id, "reservation_created");
            return Ok(Envelope::ok(target.describe(&reservation)));
        }

        let Some(mut reservation) = guarded(cancel, self.repo.load_reservation(input.id)).await? else {
            let error = format!("Reservation with id: {} does not exist.", input.id);
            warn!(%error, "reservation rejected");
            return Ok(Envelope::bad_request([error]));
        };
        if reservation.user_id != input.user_id {
            let error = format!("User with {} Id can not edit this reservation!", input.user_id);
            warn!(owner = %reservation.user_id, %error, "reservation edit by non-owner");
            return Ok(Envelope::forbidden([error]));
        }

        reservation.date = input.date;
        reservation.office_id = input.office_id;
        reservation.office_zone_id = input.office_zone_id;
        reservation.office_desk = input.office_desk;
        reservation.parking_zone_id = input.parking_zone_id;
        reservation.parking_space = input.parking_space;
        if let Err(e) = guarded(cancel, self.repo.update_reservation(&reservation)).await {
            return e.into_save_failure(EDIT_FAILED);
        }
        info!("reservation_updated");
        Ok(Envelope::ok(target.describe(&reservation)))
    }

    #[instrument(skip(self, cancel), fields(reservation_id = %id, caller = %user_id))]
    pub async fn delete(&self, id: Uuid, user_id: Uuid, cancel: &CancellationToken) -> Result<Envelope<()>, ServiceError> {
        let Some(reservation) = guarded(cancel, self.repo.load_reservation(id)).await? else {
            return Ok(Envelope::not_found(id));
        };
        if reservation.user_id != user_id {
            warn!(owner = %reservation.user_id, error = DELETE_DENIED, "reservation delete by non-owner");
            return Ok(Envelope::bad_request([DELETE_DENIED]));
        }
        if let Err(e) = guarded(cancel, self.repo.delete_reservation(id)).await {
            return e.into_save_failure(DELETE_FAILED);
        }
        info!("reservation_deleted");
        Ok(Envelope::ok_empty())
    }

    pub async fn get(&self, id: Uuid, cancel: &CancellationToken) -> Result<Envelope<ReservationModel>, ServiceError> {
        let Some(reservation) = guarded(cancel, self.repo.load_reservation(id)).await? else {
            return Ok(Envelope::not_found(id));
        };
        Ok(match self.load_target(&reservation, cancel).await? {
            Some(target) => Envelope::ok(target.describe(&reservation)),
            None => Envelope::not_found(id),
        })
    }

    /// Bookings owned by `user_id`, oldest date first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<Envelope<Vec<ReservationModel>>, ServiceError> {
        let mut reservations = guarded(cancel, self.repo.reservations_of(user_id)).await?;
        reservations.sort_by_key(|r| r.date);
        let mut out = Vec::with_capacity(reservations.len());
        for r in &reservations {
            if let Some(target) = self.load_target(r, cancel).await? {
                out.push(target.describe(r));
            }
        }
        Ok(Envelope::ok(out))
    }

    async fn load_target(&self, r: &Reservation, cancel: &CancellationToken) -> Result<Option<Target>, ServiceError> {
        let Some(office) = guarded(cancel, self.repo.load_office(r.office_id)).await? else {
            return Ok(None);
        };
        let Some(zone) = guarded(cancel, self.repo.load_office_zone(r.office_zone_id)).await? else {
            return Ok(None);
        };
        let parking = match r.parking_zone_id {
            Some(id) => guarded(cancel, self.repo.load_parking_zone(id)).await?,
            None => None,
        };
        Ok(Some(Target { office, zone, parking }))
    }
}

impl Target {
    fn describe(&self, r: &Reservation) -> ReservationModel {
        ReservationModel::assemble(r, &self.office, &self.zone, self.parking.as_ref())
    }
}
