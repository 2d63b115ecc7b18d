use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::domain::NewUser;
use crate::auth::errors::AuthError;
use crate::auth::password;
use crate::auth::repository::IdentityStore;
use crate::catalog::repository::CatalogRepository;
use crate::entities::{City, Country, LocatedOffice, Office, OfficeZone, ParkingZone, Reservation, User};
use crate::errors::ServiceError;
use crate::office::repository::OfficeRepository;
use crate::reservation::conflict::{conflicts, ConflictRule};
use crate::reservation::domain::Admission;
use crate::reservation::repository::ReservationRepository;

#[derive(Default)]
struct Tables {
    countries: Vec<Country>,
    cities: Vec<City>,
    offices: Vec<Office>,
    reservations: Vec<Reservation>,
    users: Vec<User>,
}

impl Tables {
    fn locate(&self, office: &Office) -> Option<LocatedOffice> {
        let city = self.cities.iter().find(|c| c.id == office.city_id)?;
        let country = self.countries.iter().find(|c| c.id == city.country_id)?;
        Some(LocatedOffice { office: office.clone(), city: city.clone(), country: country.clone() })
    }

    fn address_taken(&self, address: &str, except: Option<Uuid>) -> bool {
        self.offices.iter().any(|o| o.address == address && Some(o.id) != except)
    }

    fn admit_user(&self, user: &NewUser, password: &str) -> Result<(), AuthError> {
        let name_taken = self.users.iter().any(|u| u.user_name == user.user_name);
        let email_taken = self.users.iter().any(|u| u.email == user.email);
        let reasons = password::rejections(user, password, name_taken, email_taken);
        if reasons.is_empty() { Ok(()) } else { Err(AuthError::Rejected(reasons)) }
    }

    /// Drops bookings whose office or zones no longer exist.
    fn cascade(&mut self) {
        let office_zones: HashSet<Uuid> = self.offices.iter().flat_map(|o| o.office_zones.iter().map(|z| z.id)).collect();
        let parking_zones: HashSet<Uuid> =
            self.offices.iter().flat_map(|o| o.parking_zones.iter().map(|z| z.id)).collect();
        let offices: HashSet<Uuid> = self.offices.iter().map(|o| o.id).collect();
        self.reservations.retain(|r| {
            offices.contains(&r.office_id)
                && office_zones.contains(&r.office_zone_id)
                && r.parking_zone_id.map_or(true, |id| parking_zones.contains(&id))
        });
    }
}

fn unique_violation(index: &str) -> ServiceError {
    ServiceError::Db(format!("duplicate key value violates unique constraint \"{index}\""))
}

/// In-process store implementing every repository trait.
///
/// Relations and cascades mirror the database schema. [`MemoryStore::fail_writes`]
/// makes every subsequent write fail, which is how tests reach the
/// persistence-failure paths.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }

    fn writable(&self) -> Result<(), ServiceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ServiceError::Db("store is refusing writes".into()));
        }
        Ok(())
    }

    /// Adds a city, creating its country by name if needed.
    pub async fn seed_city(&self, name: &str, country: &str, symbol: &str) -> (City, Country) {
        let mut t = self.tables.write().await;
        let country = match t.countries.iter().find(|c| c.name == country) {
            Some(existing) => existing.clone(),
            None => {
                let created = Country { id: Uuid::new_v4(), name: country.to_string(), symbol: symbol.to_string() };
                t.countries.push(created.clone());
                created
            }
        };
        let city = City { id: Uuid::new_v4(), name: name.to_string(), country_id: country.id };
        t.cities.push(city.clone());
        (city, country)
    }

    pub async fn office_count(&self) -> usize { self.tables.read().await.offices.len() }

    pub async fn reservation_count(&self) -> usize { self.tables.read().await.reservations.len() }

    pub async fn user_count(&self) -> usize { self.tables.read().await.users.len() }
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn list_countries(&self) -> Result<Vec<Country>, ServiceError> {
        Ok(self.tables.read().await.countries.clone())
    }

    async fn list_cities(&self, country: Option<&str>) -> Result<Vec<(City, Country)>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.cities
            .iter()
            .filter_map(|city| {
                let owner = t.countries.iter().find(|c| c.id == city.country_id)?;
                match country {
                    Some(name) if owner.name != name => None,
                    _ => Some((city.clone(), owner.clone())),
                }
            })
            .collect())
    }

    async fn find_country_by_name(&self, name: &str) -> Result<Option<Country>, ServiceError> {
        Ok(self.tables.read().await.countries.iter().find(|c| c.name == name).cloned())
    }

    async fn find_city(&self, name: &str, country_id: Uuid) -> Result<Option<City>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.cities.iter().find(|c| c.name == name && c.country_id == country_id).cloned())
    }

    async fn insert_city(&self, city: &City, new_country: Option<&Country>) -> Result<(), ServiceError> {
        let mut t = self.tables.write().await;
        self.writable()?;
        if let Some(country) = new_country {
            models::country::validate_symbol(&country.symbol)?;
            if t.countries.iter().any(|c| c.name == country.name) {
                return Err(unique_violation("uniq_country_name"));
            }
            t.countries.push(country.clone());
        }
        if t.cities.iter().any(|c| c.name == city.name && c.country_id == city.country_id) {
            return Err(unique_violation("uniq_city_name_country"));
        }
        t.cities.push(city.clone());
        Ok(())
    }
}

#[async_trait]
impl OfficeRepository for MemoryStore {
    async fn locate_city(&self, name: &str) -> Result<Option<(City, Country)>, ServiceError> {
        let t = self.tables.read().await;
        let Some(city) = t.cities.iter().find(|c| c.name == name) else {
            return Ok(None);
        };
        Ok(t.countries.iter().find(|c| c.id == city.country_id).map(|country| (city.clone(), country.clone())))
    }

    async fn address_taken(&self, address: &str, except: Option<Uuid>) -> Result<bool, ServiceError> {
        Ok(self.tables.read().await.address_taken(address, except))
    }

    async fn find_office(&self, id: Uuid) -> Result<Option<LocatedOffice>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.offices.iter().find(|o| o.id == id).and_then(|o| t.locate(o)))
    }

    async fn list_offices(&self) -> Result<Vec<LocatedOffice>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.offices.iter().filter_map(|o| t.locate(o)).collect())
    }

    async fn insert_office(&self, office: &Office) -> Result<(), ServiceError> {
        let mut t = self.tables.write().await;
        self.writable()?;
        super::check_capacities(office)?;
        if t.address_taken(&office.address, None) {
            return Err(unique_violation("uniq_office_address"));
        }
        t.offices.push(office.clone());
        Ok(())
    }

    async fn update_office(&self, office: &Office) -> Result<(), ServiceError> {
        let mut t = self.tables.write().await;
        self.writable()?;
        super::check_capacities(office)?;
        if t.address_taken(&office.address, Some(office.id)) {
            return Err(unique_violation("uniq_office_address"));
        }
        let Some(slot) = t.offices.iter_mut().find(|o| o.id == office.id) else {
            return Err(ServiceError::Db(format!("office {} no longer exists", office.id)));
        };
        *slot = office.clone();
        t.cascade();
        Ok(())
    }

    async fn delete_office(&self, id: Uuid) -> Result<(), ServiceError> {
        let mut t = self.tables.write().await;
        self.writable()?;
        t.offices.retain(|o| o.id != id);
        t.cascade();
        Ok(())
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn load_office(&self, id: Uuid) -> Result<Option<LocatedOffice>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.offices.iter().find(|o| o.id == id).and_then(|o| t.locate(o)))
    }

    async fn load_office_zone(&self, id: Uuid) -> Result<Option<OfficeZone>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.offices.iter().flat_map(|o| o.office_zones.iter()).find(|z| z.id == id).cloned())
    }

    async fn load_parking_zone(&self, id: Uuid) -> Result<Option<ParkingZone>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.offices.iter().flat_map(|o| o.parking_zones.iter()).find(|z| z.id == id).cloned())
    }

    async fn load_reservation(&self, id: Uuid) -> Result<Option<Reservation>, ServiceError> {
        Ok(self.tables.read().await.reservations.iter().find(|r| r.id == id).cloned())
    }

    async fn reservations_of(&self, user_id: Uuid) -> Result<Vec<Reservation>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.reservations.iter().filter(|r| r.user_id == user_id).cloned().collect())
    }

    async fn insert_if_vacant(&self, reservation: &Reservation, rule: ConflictRule) -> Result<Admission, ServiceError> {
        let mut t = self.tables.write().await;
        if t.reservations.iter().any(|stored| conflicts(rule, stored, reservation)) {
            return Ok(Admission::Occupied);
        }
        self.writable()?;
        t.reservations.push(reservation.clone());
        Ok(Admission::Inserted)
    }

    async fn update_reservation(&self, reservation: &Reservation) -> Result<(), ServiceError> {
        let mut t = self.tables.write().await;
        self.writable()?;
        let slot_taken = t.reservations.iter().any(|r| {
            r.id != reservation.id
                && r.office_id == reservation.office_id
                && r.office_zone_id == reservation.office_zone_id
                && r.office_desk == reservation.office_desk
                && r.day() == reservation.day()
        });
        if slot_taken {
            return Err(unique_violation("uniq_reservation_slot"));
        }
        let Some(slot) = t.reservations.iter_mut().find(|r| r.id == reservation.id) else {
            return Err(ServiceError::Db(format!("reservation {} no longer exists", reservation.id)));
        };
        *slot = reservation.clone();
        Ok(())
    }

    async fn delete_reservation(&self, id: Uuid) -> Result<(), ServiceError> {
        let mut t = self.tables.write().await;
        self.writable()?;
        t.reservations.retain(|r| r.id != id);
        Ok(())
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self.tables.read().await.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_user_name(&self, user_name: &str) -> Result<Option<User>, AuthError> {
        Ok(self.tables.read().await.users.iter().find(|u| u.user_name == user_name).cloned())
    }

    async fn create_user(&self, user: NewUser, password: &str) -> Result<User, AuthError> {
        self.tables.read().await.admit_user(&user, password)?;
        // argon2 runs outside the lock; uniqueness is checked again before the push
        let password_hash = password::hash_password(password)?;
        let mut t = self.tables.write().await;
        t.admit_user(&user, password)?;
        self.writable().map_err(|e| AuthError::Repository(e.to_string()))?;
        let created = User {
            id: Uuid::new_v4(),
            email: user.email,
            user_name: user.user_name,
            full_name: user.full_name,
            phone_number: user.phone_number,
            password_hash,
            is_receptionist: user.is_receptionist,
        };
        t.users.push(created.clone());
        Ok(created)
    }

    async fn check_password(&self, user: &User, password: &str) -> Result<bool, AuthError> {
        password::verify_password(password, &user.password_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;

    fn office(city_id: Uuid, address: &str) -> Office {
        let id = Uuid::new_v4();
        Office {
            id,
            address: address.into(),
            post_code: "00000".into(),
            office_map_url: None,
            city_id,
            creator_id: Uuid::new_v4(),
            office_zones: vec![OfficeZone { id: Uuid::new_v4(), name: "A".into(), desks: 3, office_id: id }],
            parking_zones: vec![ParkingZone { id: Uuid::new_v4(), name: "P".into(), spaces: 3, office_id: id }],
        }
    }

    fn booking(o: &Office, desk: &str) -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            date: Utc::now(),
            office_id: o.id,
            office_zone_id: o.office_zones[0].id,
            office_desk: desk.into(),
            parking_zone_id: Some(o.parking_zones[0].id),
            parking_space: Some("1".into()),
            user_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn dropping_parking_zone_cascades_to_bookings() {
        let store = MemoryStore::new();
        let (city, _) = store.seed_city("Kaunas", "Lithuania", "LT").await;
        let mut o = office(city.id, "Laisves 1");
        store.insert_office(&o).await.unwrap();
        let r = booking(&o, "D1");
        assert_eq!(store.insert_if_vacant(&r, ConflictRule::SameSlot).await.unwrap(), Admission::Inserted);

        o.parking_zones.clear();
        store.update_office(&o).await.unwrap();
        assert_eq!(store.reservation_count().await, 0);
    }

    #[tokio::test]
    async fn address_uniqueness_is_enforced_on_write() {
        let store = MemoryStore::new();
        let (city, _) = store.seed_city("Kaunas", "Lithuania", "LT").await;
        store.insert_office(&office(city.id, "Laisves 1")).await.unwrap();
        let err = store.insert_office(&office(city.id, "Laisves 1")).await.unwrap_err();
        assert!(err.to_string().contains("uniq_office_address"));
    }

    #[tokio::test]
    async fn negative_capacity_is_refused() {
        let store = MemoryStore::new();
        let (city, _) = store.seed_city("Kaunas", "Lithuania", "LT").await;
        let mut o = office(city.id, "Laisves 1");
        o.office_zones[0].desks = -1;
        assert!(matches!(store.insert_office(&o).await, Err(ServiceError::Model(_))));
    }

    #[tokio::test]
    async fn moving_a_booking_onto_a_taken_desk_fails() {
        let store = MemoryStore::new();
        let (city, _) = store.seed_city("Kaunas", "Lithuania", "LT").await;
        let o = office(city.id, "Laisves 1");
        store.insert_office(&o).await.unwrap();
        let a = booking(&o, "D1");
        let mut b = booking(&o, "D2");
        b.parking_space = Some("2".into());
        store.insert_if_vacant(&a, ConflictRule::SameSlot).await.unwrap();
        store.insert_if_vacant(&b, ConflictRule::SameSlot).await.unwrap();
        b.office_desk = "D1".into();
        assert!(store.update_reservation(&b).await.is_err());
    }

    fn new_user(user_name: &str, email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            user_name: user_name.into(),
            full_name: "Ona Test".into(),
            phone_number: "123123123".into(),
            is_receptionist: false,
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_registrations_admit_one_user_name() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.create_user(new_user("ona", &format!("ona{i}@example.com")), "Secr3t!").await
                })
            })
            .collect();
        let mut admitted = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => admitted += 1,
                Err(AuthError::Rejected(reasons)) => assert_eq!(reasons, ["Username 'ona' is already taken."]),
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(admitted, 1);
        assert_eq!(store.user_count().await, 1);
    }
}
