//! Anomaly identifier sources.
//!
//! Identifiers are the only non-deterministic part of an anomaly event.
//! The [`AnomalyIdSource`] trait lets tests and replays substitute a
//! deterministic sequence for the default UUID v7 generator.

use sentinel_types::AnomalyId;
use uuid::Uuid;

/// A source of fresh anomaly identifiers.
pub trait AnomalyIdSource {
    /// Produce the identifier for the next anomaly created.
    fn next_id(&mut self) -> AnomalyId;
}

/// Time-ordered random identifiers (UUID v7).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdSource;

impl AnomalyIdSource for UuidIdSource {
    fn next_id(&mut self) -> AnomalyId {
        AnomalyId::new()
    }
}

/// Deterministic identifiers `1, 2, 3, ...` encoded as UUIDs.
#[derive(Debug, Clone, Default)]
pub struct SequentialIdSource {
    issued: u128,
}

impl SequentialIdSource {
    /// Start a new sequence; the first identifier issued is `1`.
    pub const fn new() -> Self {
        Self { issued: 0 }
    }

    /// The identifier the `n`th call to [`next_id`] returns.
    ///
    /// [`next_id`]: AnomalyIdSource::next_id
    pub fn nth(n: u128) -> AnomalyId {
        AnomalyId::from(Uuid::from_u128(n))
    }
}

impl AnomalyIdSource for SequentialIdSource {
    fn next_id(&mut self) -> AnomalyId {
        self.issued = self.issued.saturating_add(1);
        Self::nth(self.issued)
    }
}
