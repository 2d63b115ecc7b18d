//! When a new booking collides with a stored one.

pub use configs::ConflictRule;

use crate::entities::Reservation;

/// `Legacy`: same day, office, zone, parking zone and parking space, or the
/// same desk label on any day in any office. Absent parking values compare
/// equal to each other.
///
/// `SameSlot`: same day and office, and either the same zone and desk or the
/// same (present) parking zone and space.
pub fn conflicts(rule: ConflictRule, stored: &Reservation, candidate: &Reservation) -> bool {
    match rule {
        ConflictRule::Legacy => {
            let same_slot = stored.day() == candidate.day()
                && stored.office_id == candidate.office_id
                && stored.office_zone_id == candidate.office_zone_id
                && stored.parking_zone_id == candidate.parking_zone_id
                && stored.parking_space == candidate.parking_space;
            same_slot || stored.office_desk == candidate.office_desk
        }
        ConflictRule::SameSlot => {
            if stored.day() != candidate.day() || stored.office_id != candidate.office_id {
                return false;
            }
            let desk = stored.office_zone_id == candidate.office_zone_id && stored.office_desk == candidate.office_desk;
            let parking = candidate.parking_zone_id.is_some()
                && candidate.parking_space.is_some()
                && stored.parking_zone_id == candidate.parking_zone_id
                && stored.parking_space == candidate.parking_space;
            desk || parking
        }
    }
}
