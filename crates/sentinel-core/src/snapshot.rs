//! Per-tick snapshot normalization.
//!
//! Entities are validated once, before any detector runs. A malformed
//! entity is logged and left out of this tick; everything else proceeds.

use sentinel_types::Entity;
use tracing::warn;

/// The validated view of one tick.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    /// Entities that passed validation, in input order.
    pub entities: Vec<&'a Entity>,
    /// Tick timestamp in seconds.
    pub timestamp: f64,
    /// Number of entities rejected this tick.
    pub rejected: usize,
}

impl<'a> Snapshot<'a> {
    /// Entities of kind person, in input order.
    pub fn people(&self) -> impl Iterator<Item = &'a Entity> + '_ {
        self.entities.iter().copied().filter(|e| e.is_person())
    }
}

/// Validate every entity and keep the usable ones.
pub fn normalize_snapshot(entities: &[Entity], timestamp: f64) -> Snapshot<'_> {
    let mut accepted = Vec::with_capacity(entities.len());
    let mut rejected: usize = 0;

    for entity in entities {
        match entity.validate() {
            Ok(()) => accepted.push(entity),
            Err(e) => {
                rejected = rejected.saturating_add(1);
                warn!(error = %e, timestamp, "skipping malformed entity");
            }
        }
    }

    Snapshot {
        entities: accepted,
        timestamp,
        rejected,
    }
}
