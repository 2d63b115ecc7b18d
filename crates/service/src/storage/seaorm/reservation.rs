use async_trait::async_trait;
use chrono::Utc;
use models::{office as office_row, office_zone, parking_zone, reservation as reservation_row};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IsolationLevel, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use super::{is_unique_violation, locate, SeaOrmStore};
use crate::entities::{LocatedOffice, OfficeZone, ParkingZone, Reservation};
use crate::errors::ServiceError;
use crate::reservation::conflict::ConflictRule;
use crate::reservation::domain::Admission;
use crate::reservation::repository::ReservationRepository;

use reservation_row::Column;

/// SQL form of [`crate::reservation::conflict::conflicts`].
fn conflict_condition(rule: ConflictRule, r: &Reservation) -> Condition {
    match rule {
        ConflictRule::Legacy => {
            let parking_zone = match r.parking_zone_id {
                Some(id) => Column::ParkingZoneId.eq(id),
                None => Column::ParkingZoneId.is_null(),
            };
            let parking_space = match &r.parking_space {
                Some(space) => Column::ParkingSpace.eq(space.clone()),
                None => Column::ParkingSpace.is_null(),
            };
            Condition::any()
                .add(
                    Condition::all()
                        .add(Column::Day.eq(r.day()))
                        .add(Column::OfficeId.eq(r.office_id))
                        .add(Column::OfficeZoneId.eq(r.office_zone_id))
                        .add(parking_zone)
                        .add(parking_space),
                )
                .add(Column::OfficeDesk.eq(r.office_desk.clone()))
        }
        ConflictRule::SameSlot => {
            let mut seat = Condition::any().add(
                Condition::all()
                    .add(Column::OfficeZoneId.eq(r.office_zone_id))
                    .add(Column::OfficeDesk.eq(r.office_desk.clone())),
            );
            if let (Some(zone), Some(space)) = (r.parking_zone_id, &r.parking_space) {
                seat = seat.add(
                    Condition::all()
                        .add(Column::ParkingZoneId.eq(zone))
                        .add(Column::ParkingSpace.eq(space.clone())),
                );
            }
            Condition::all()
                .add(Column::Day.eq(r.day()))
                .add(Column::OfficeId.eq(r.office_id))
                .add(seat)
        }
    }
}

#[async_trait]
impl ReservationRepository for SeaOrmStore {
    async fn load_office(&self, id: Uuid) -> Result<Option<LocatedOffice>, ServiceError> {
        match office_row::Entity::find_by_id(id).one(&self.db).await? {
            Some(row) => Ok(locate(&self.db, row).await?),
            None => Ok(None),
        }
    }

    async fn load_office_zone(&self, id: Uuid) -> Result<Option<OfficeZone>, ServiceError> {
        Ok(office_zone::Entity::find_by_id(id).one(&self.db).await?.map(Into::into))
    }

    async fn load_parking_zone(&self, id: Uuid) -> Result<Option<ParkingZone>, ServiceError> {
        Ok(parking_zone::Entity::find_by_id(id).one(&self.db).await?.map(Into::into))
    }

    async fn load_reservation(&self, id: Uuid) -> Result<Option<Reservation>, ServiceError> {
        Ok(reservation_row::Entity::find_by_id(id).one(&self.db).await?.map(Into::into))
    }

    async fn reservations_of(&self, user_id: Uuid) -> Result<Vec<Reservation>, ServiceError> {
        let rows = reservation_row::Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::Date)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_if_vacant(&self, r: &Reservation, rule: ConflictRule) -> Result<Admission, ServiceError> {
        let txn = self.db.begin_with_config(Some(IsolationLevel::Serializable), None).await?;
        let clash = reservation_row::Entity::find().filter(conflict_condition(rule, r)).one(&txn).await?;
        if let Some(stored) = clash {
            debug!(clash_id = %stored.id, "slot occupied");
            txn.rollback().await?;
            return Ok(Admission::Occupied);
        }

        let row = reservation_row::ActiveModel {
            id: Set(r.id),
            date: Set(r.date.into()),
            day: Set(r.day()),
            office_id: Set(r.office_id),
            office_zone_id: Set(r.office_zone_id),
            office_desk: Set(r.office_desk.clone()),
            parking_zone_id: Set(r.parking_zone_id),
            parking_space: Set(r.parking_space.clone()),
            user_id: Set(r.user_id),
            created_at: Set(Utc::now().into()),
        };
        if let Err(e) = row.insert(&txn).await {
            txn.rollback().await?;
            return if is_unique_violation(&e) { Ok(Admission::Occupied) } else { Err(e.into()) };
        }
        match txn.commit().await {
            Ok(()) => Ok(Admission::Inserted),
            Err(e) if is_unique_violation(&e) => Ok(Admission::Occupied),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_reservation(&self, r: &Reservation) -> Result<(), ServiceError> {
        let Some(row) = reservation_row::Entity::find_by_id(r.id).one(&self.db).await? else {
            return Err(ServiceError::Db(format!("reservation {} no longer exists", r.id)));
        };
        let mut am: reservation_row::ActiveModel = row.into();
        am.date = Set(r.date.into());
        am.day = Set(r.day());
        am.office_id = Set(r.office_id);
        am.office_zone_id = Set(r.office_zone_id);
        am.office_desk = Set(r.office_desk.clone());
        am.parking_zone_id = Set(r.parking_zone_id);
        am.parking_space = Set(r.parking_space.clone());
        am.update(&self.db).await?;
        Ok(())
    }

    async fn delete_reservation(&self, id: Uuid) -> Result<(), ServiceError> {
        reservation_row::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
