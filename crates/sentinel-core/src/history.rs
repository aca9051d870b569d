//! Rolling per-entity position history.
//!
//! Each person's recent positions are kept for [`HISTORY_WINDOW_SECS`].
//! Pruning happens only when a new sample is recorded for that entity, so
//! the history of an entity that leaves the venue simply stops growing.

use std::collections::BTreeMap;

use sentinel_types::Vec3;

/// Samples older than this, relative to the newest one, are dropped.
pub const HISTORY_WINDOW_SECS: f64 = 60.0;

/// One recorded position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    /// Tick timestamp in seconds.
    pub timestamp: f64,
    /// Position at that tick.
    pub position: Vec3,
}

/// Bounded position history keyed by entity id.
#[derive(Debug, Clone, Default)]
pub struct HistoryTracker {
    samples: BTreeMap<String, Vec<PositionSample>>,
}

impl HistoryTracker {
    /// Create an empty tracker.
    pub const fn new() -> Self {
        Self {
            samples: BTreeMap::new(),
        }
    }

    /// Append a sample for `entity_id`, then drop every sample of that
    /// entity with `timestamp <= now - HISTORY_WINDOW_SECS`.
    pub fn record(&mut self, entity_id: &str, timestamp: f64, position: Vec3) {
        let window = self.samples.entry(entity_id.to_owned()).or_default();
        window.push(PositionSample {
            timestamp,
            position,
        });
        let cutoff = timestamp - HISTORY_WINDOW_SECS;
        window.retain(|s| s.timestamp > cutoff);
    }

    /// Retained samples for `entity_id`, oldest first. Empty if unknown.
    pub fn window(&self, entity_id: &str) -> &[PositionSample] {
        self.samples.get(entity_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of entities with a history.
    pub fn tracked(&self) -> usize {
        self.samples.len()
    }
}
