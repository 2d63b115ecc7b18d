//! Matching submitted zones against stored ones on office update.
//!
//! A submitted zone keeps the id of the stored zone with the same name; any
//! stored zone left unmatched is dropped (and its bookings with it). The
//! submitted order is kept.

use uuid::Uuid;

use super::domain::{OfficeZoneInput, ParkingZoneInput};
use crate::entities::{OfficeZone, ParkingZone};

/// Ids for `incoming` names, reusing `existing` ids by name. Each stored id is
/// claimed at most once.
fn reuse_ids<'a>(existing: &[(&'a str, Uuid)], incoming: impl Iterator<Item = &'a str>) -> Vec<Uuid> {
    let mut claimed = vec![false; existing.len()];
    incoming
        .map(|name| {
            let hit = existing
                .iter()
                .enumerate()
                .find(|(i, (n, _))| !claimed[*i] && *n == name);
            match hit {
                Some((i, (_, id))) => {
                    claimed[i] = true;
                    *id
                }
                None => Uuid::new_v4(),
            }
        })
        .collect()
}

pub fn office_zones(office_id: Uuid, existing: &[OfficeZone], incoming: &[OfficeZoneInput]) -> Vec<OfficeZone> {
    let stored: Vec<_> = existing.iter().map(|z| (z.name.as_str(), z.id)).collect();
    let ids = reuse_ids(&stored, incoming.iter().map(|z| z.name.as_str()));
    incoming
        .iter()
        .zip(ids)
        .map(|(z, id)| OfficeZone { id, name: z.name.clone(), desks: z.desks, office_id })
        .collect()
}

pub fn parking_zones(office_id: Uuid, existing: &[ParkingZone], incoming: &[ParkingZoneInput]) -> Vec<ParkingZone> {
    let stored: Vec<_> = existing.iter().map(|z| (z.name.as_str(), z.id)).collect();
    let ids = reuse_ids(&stored, incoming.iter().map(|z| z.name.as_str()));
    incoming
        .iter()
        .zip(ids)
        .map(|(z, id)| ParkingZone { id, name: z.name.clone(), spaces: z.spaces, office_id })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(office_id: Uuid, names: &[&str]) -> Vec<OfficeZone> {
        names
            .iter()
            .map(|n| OfficeZone { id: Uuid::new_v4(), name: n.to_string(), desks: 2, office_id })
            .collect()
    }

    fn submitted(names: &[&str]) -> Vec<OfficeZoneInput> {
        names.iter().map(|n| OfficeZoneInput { name: n.to_string(), desks: 9 }).collect()
    }

    #[test]
    fn same_names_keep_ids_and_take_new_values() {
        let office = Uuid::new_v4();
        let existing = stored(office, &["A", "B"]);
        let out = office_zones(office, &existing, &submitted(&["B", "A"]));
        assert_eq!(out[0].id, existing[1].id);
        assert_eq!(out[1].id, existing[0].id);
        assert!(out.iter().all(|z| z.desks == 9 && z.office_id == office));
    }

    #[test]
    fn renamed_zone_gets_a_fresh_id() {
        let office = Uuid::new_v4();
        let existing = stored(office, &["A", "B"]);
        let out = office_zones(office, &existing, &submitted(&["A", "C"]));
        assert_eq!(out[0].id, existing[0].id);
        assert!(existing.iter().all(|z| z.id != out[1].id));
        assert_eq!(out[1].name, "C");
    }

    #[test]
    fn duplicate_parking_names_claim_distinct_ids() {
        let office = Uuid::new_v4();
        let existing = vec![
            ParkingZone { id: Uuid::new_v4(), name: "P".into(), spaces: 1, office_id: office },
            ParkingZone { id: Uuid::new_v4(), name: "P".into(), spaces: 1, office_id: office },
        ];
        let incoming = vec![
            ParkingZoneInput { name: "P".into(), spaces: 3 },
            ParkingZoneInput { name: "P".into(), spaces: 4 },
        ];
        let out = parking_zones(office, &existing, &incoming);
        assert_eq!(out[0].id, existing[0].id);
        assert_eq!(out[1].id, existing[1].id);
    }
}
