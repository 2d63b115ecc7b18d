use async_trait::async_trait;
use chrono::Utc;
use models::{city, country, office as office_row, office_zone, parking_zone};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use super::{locate, SeaOrmStore};
use crate::entities::{City, Country, LocatedOffice, Office};
use crate::errors::ServiceError;
use crate::office::repository::OfficeRepository;
use crate::storage::check_capacities;

fn office_zone_rows(office: &Office) -> Vec<office_zone::ActiveModel> {
    office
        .office_zones
        .iter()
        .map(|z| office_zone::ActiveModel {
            id: Set(z.id),
            name: Set(z.name.clone()),
            desks: Set(z.desks),
            office_id: Set(office.id),
        })
        .collect()
}

fn parking_zone_rows(office: &Office) -> Vec<parking_zone::ActiveModel> {
    office
        .parking_zones
        .iter()
        .map(|z| parking_zone::ActiveModel {
            id: Set(z.id),
            name: Set(z.name.clone()),
            spaces: Set(z.spaces),
            office_id: Set(office.id),
        })
        .collect()
}

/// Deletes the office's zones that `office` no longer lists, then upserts the
/// rest by id. Reservations on deleted zones go through the FK cascade.
async fn sync_zones(txn: &DatabaseTransaction, office: &Office) -> Result<(), ServiceError> {
    let keep: Vec<Uuid> = office.office_zones.iter().map(|z| z.id).collect();
    office_zone::Entity::delete_many()
        .filter(office_zone::Column::OfficeId.eq(office.id))
        .filter(office_zone::Column::Id.is_not_in(keep))
        .exec(txn)
        .await?;
    let keep: Vec<Uuid> = office.parking_zones.iter().map(|z| z.id).collect();
    parking_zone::Entity::delete_many()
        .filter(parking_zone::Column::OfficeId.eq(office.id))
        .filter(parking_zone::Column::Id.is_not_in(keep))
        .exec(txn)
        .await?;

    for row in office_zone_rows(office) {
        office_zone::Entity::insert(row)
            .on_conflict(
                OnConflict::column(office_zone::Column::Id)
                    .update_columns([office_zone::Column::Name, office_zone::Column::Desks])
                    .to_owned(),
            )
            .exec(txn)
            .await?;
    }
    for row in parking_zone_rows(office) {
        parking_zone::Entity::insert(row)
            .on_conflict(
                OnConflict::column(parking_zone::Column::Id)
                    .update_columns([parking_zone::Column::Name, parking_zone::Column::Spaces])
                    .to_owned(),
            )
            .exec(txn)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl OfficeRepository for SeaOrmStore {
    async fn locate_city(&self, name: &str) -> Result<Option<(City, Country)>, ServiceError> {
        let row = city::Entity::find()
            .filter(city::Column::Name.eq(name))
            .find_also_related(country::Entity)
            .one(&self.db)
            .await?;
        Ok(match row {
            Some((city, Some(country))) => Some((city.into(), country.into())),
            _ => None,
        })
    }

    async fn address_taken(&self, address: &str, except: Option<Uuid>) -> Result<bool, ServiceError> {
        let mut query = office_row::Entity::find().filter(office_row::Column::Address.eq(address));
        if let Some(id) = except {
            query = query.filter(office_row::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    async fn find_office(&self, id: Uuid) -> Result<Option<LocatedOffice>, ServiceError> {
        match office_row::Entity::find_by_id(id).one(&self.db).await? {
            Some(row) => Ok(locate(&self.db, row).await?),
            None => Ok(None),
        }
    }

    async fn list_offices(&self) -> Result<Vec<LocatedOffice>, ServiceError> {
        let rows = office_row::Entity::find().order_by_asc(office_row::Column::CreatedAt).all(&self.db).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.extend(locate(&self.db, row).await?);
        }
        Ok(out)
    }

    async fn insert_office(&self, office: &Office) -> Result<(), ServiceError> {
        check_capacities(office)?;
        let now: DateTimeWithTimeZone = Utc::now().into();
        let txn = self.db.begin().await?;
        office_row::ActiveModel {
            id: Set(office.id),
            address: Set(office.address.clone()),
            post_code: Set(office.post_code.clone()),
            office_map_url: Set(office.office_map_url.clone()),
            city_id: Set(office.city_id),
            creator_id: Set(office.creator_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;
        for row in office_zone_rows(office) {
            row.insert(&txn).await?;
        }
        for row in parking_zone_rows(office) {
            row.insert(&txn).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    async fn update_office(&self, office: &Office) -> Result<(), ServiceError> {
        check_capacities(office)?;
        let txn = self.db.begin().await?;
        let Some(row) = office_row::Entity::find_by_id(office.id).one(&txn).await? else {
            return Err(ServiceError::Db(format!("office {} no longer exists", office.id)));
        };
        let mut am: office_row::ActiveModel = row.into();
        am.address = Set(office.address.clone());
        am.post_code = Set(office.post_code.clone());
        am.office_map_url = Set(office.office_map_url.clone());
        am.city_id = Set(office.city_id);
        am.updated_at = Set(Utc::now().into());
        am.update(&txn).await?;
        sync_zones(&txn, office).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn delete_office(&self, id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        office_zone::Entity::delete_many().filter(office_zone::Column::OfficeId.eq(id)).exec(&txn).await?;
        parking_zone::Entity::delete_many().filter(parking_zone::Column::OfficeId.eq(id)).exec(&txn).await?;
        office_row::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }
}
