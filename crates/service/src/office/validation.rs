//! Stateless office rules. Each returns the message for a violated rule.

use std::collections::HashSet;

use super::domain::OfficeZoneInput;

pub const ZONES_REQUIRED: &str = "OffizeZones can not be null.";
pub const ZONE_NAMES_DISTINCT: &str = "Office Zones must have different name.";

pub fn zones_present(zones: &[OfficeZoneInput]) -> Option<String> {
    if zones.is_empty() || zones.iter().any(|z| z.name.is_empty()) {
        return Some(ZONES_REQUIRED.to_string());
    }
    None
}

pub fn zone_names_distinct(zones: &[OfficeZoneInput]) -> Option<String> {
    let mut seen = HashSet::new();
    if zones.iter().all(|z| seen.insert(z.name.as_str())) {
        None
    } else {
        Some(ZONE_NAMES_DISTINCT.to_string())
    }
}
