//! Rule evaluators that turn a tick snapshot into candidate anomalies.
//!
//! Each detector is a pure function of the snapshot plus whatever engine
//! state it is handed by reference. Detectors are independent: none reads
//! another's output. The engine runs them in a fixed order (compression,
//! speed, loitering, restricted entry) because correlation is sensitive to
//! candidate order.
//!
//! # Submodules
//!
//! - [`compression`] -- Zone density above the crush-risk threshold.
//! - [`speed`] -- Horizontal speed above the role ceiling.
//! - [`loitering`] -- Prolonged presence inside a small box.
//! - [`restricted`] -- Non-player presence in a restricted zone.

pub mod compression;
pub mod loitering;
pub mod restricted;
pub mod speed;

use sentinel_types::{AnomalyEvent, AnomalyMetrics, AnomalySubtype, Severity, Vec3};

use crate::id_source::AnomalyIdSource;

/// Everything a detector decides about an anomaly. Identity, category and
/// timestamp are filled in by [`Draft::emit`].
#[derive(Debug, Clone)]
pub(crate) struct Draft {
    pub(crate) subtype: AnomalySubtype,
    pub(crate) severity: Severity,
    pub(crate) scenario: Option<&'static str>,
    pub(crate) headline: String,
    pub(crate) description: String,
    pub(crate) baseline_text: String,
    pub(crate) anomaly_text: String,
    pub(crate) zone: String,
    pub(crate) location: Vec3,
    pub(crate) entity_ids: Vec<String>,
    pub(crate) metrics: AnomalyMetrics,
}

impl Draft {
    /// Finalize into an unescalated event.
    pub(crate) fn emit(self, ids: &mut impl AnomalyIdSource, timestamp: f64) -> AnomalyEvent {
        AnomalyEvent {
            anomaly_id: ids.next_id(),
            category: self.subtype.category(),
            subtype: self.subtype,
            severity: self.severity,
            scenario: self.scenario.map(str::to_owned),
            headline: self.headline,
            description: self.description,
            baseline_text: self.baseline_text,
            anomaly_text: self.anomaly_text,
            zone: self.zone,
            location: self.location,
            entity_ids: self.entity_ids,
            metrics: self.metrics,
            occurred_at: timestamp,
            rule_of_three_hit: false,
            related_anomalies: None,
        }
    }
}
