//! Store implementations behind the repository traits.
//!
//! [`memory::MemoryStore`] keeps everything in process and backs the tests
//! and `memory://` deployments; [`seaorm::SeaOrmStore`] talks to Postgres.

pub mod memory;
pub mod seaorm;

pub use memory::MemoryStore;
pub use seaorm::SeaOrmStore;

use models::errors::ModelError;
use models::{office_zone, parking_zone};

use crate::entities::Office;

/// Row-level checks both stores apply before writing an office.
pub(crate) fn check_capacities(office: &Office) -> Result<(), ModelError> {
    for zone in &office.office_zones {
        office_zone::validate_desks(zone.desks)?;
    }
    for zone in &office.parking_zones {
        parking_zone::validate_spaces(zone.spaces)?;
    }
    Ok(())
}
