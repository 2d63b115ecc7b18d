use chrono::{TimeZone, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{app_user, city, country, db, office, office_zone, reservation};

async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

async fn seed_office(db: &DatabaseConnection) -> anyhow::Result<(app_user::Model, office::Model, office_zone::Model)> {
    let now = Utc::now().into();
    let tag = Uuid::new_v4();
    let co = country::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("country_{tag}")),
        symbol: Set("PL".into()),
    }
    .insert(db)
    .await?;
    let ci = city::ActiveModel { id: Set(Uuid::new_v4()), name: Set("Olsztyn".into()), country_id: Set(co.id) }
        .insert(db)
        .await?;
    let user = app_user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(format!("u_{tag}@example.com")),
        user_name: Set(format!("u_{tag}")),
        full_name: Set("Schema Test".into()),
        phone_number: Set("123123123".into()),
        password_hash: Set("x".into()),
        is_receptionist: Set(true),
        created_at: Set(now),
    }
    .insert(db)
    .await?;
    let of = office::ActiveModel {
        id: Set(Uuid::new_v4()),
        address: Set(format!("addr_{tag}")),
        post_code: Set("10-001".into()),
        office_map_url: Set(None),
        city_id: Set(ci.id),
        creator_id: Set(user.id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    let zone = office_zone::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("A".into()),
        desks: Set(5),
        office_id: Set(of.id),
    }
    .insert(db)
    .await?;
    Ok((user, of, zone))
}

fn booking(user: Uuid, office: Uuid, zone: Uuid, desk: &str) -> reservation::ActiveModel {
    let date = Utc.with_ymd_and_hms(2030, 5, 17, 9, 0, 0).unwrap();
    reservation::ActiveModel {
        id: Set(Uuid::new_v4()),
        date: Set(date.into()),
        day: Set(reservation::day_of(date)),
        office_id: Set(office),
        office_zone_id: Set(zone),
        office_desk: Set(desk.into()),
        parking_zone_id: Set(None),
        parking_space: Set(None),
        user_id: Set(user),
        created_at: Set(Utc::now().into()),
    }
}

#[tokio::test]
async fn slot_index_rejects_second_booking_of_same_desk() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let (user, of, zone) = seed_office(&db).await?;

    booking(user.id, of.id, zone.id, "1").insert(&db).await?;
    let dup = booking(user.id, of.id, zone.id, "1").insert(&db).await;
    assert!(dup.is_err());

    office::Entity::delete_by_id(of.id).exec(&db).await?;
    app_user::Entity::delete_by_id(user.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn deleting_office_cascades_to_zones_and_reservations() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let (user, of, zone) = seed_office(&db).await?;
    booking(user.id, of.id, zone.id, "2").insert(&db).await?;

    office::Entity::delete_by_id(of.id).exec(&db).await?;

    let zones = office_zone::Entity::find().filter(office_zone::Column::OfficeId.eq(of.id)).all(&db).await?;
    assert!(zones.is_empty());
    let left = reservation::Entity::find().filter(reservation::Column::OfficeId.eq(of.id)).all(&db).await?;
    assert!(left.is_empty());

    app_user::Entity::delete_by_id(user.id).exec(&db).await?;
    Ok(())
}
