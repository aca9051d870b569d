//! The per-tick entry point.
//!
//! [`AnomalyEngine::detect`] runs one tick through these phases:
//!
//! 1. **Normalize** -- validate entities, skipping malformed ones.
//! 2. **Baselines** -- seed (or blend) per-zone densities.
//! 3. **History** -- record each person's position and prune the window.
//!    Skipped when the timestamp is earlier than one already seen.
//! 4. **Detect** -- crowd compression per zone, speed, loitering, then
//!    restricted-zone entry. This order is fixed.
//! 5. **Correlate** -- Rule-of-Three escalation over the tick's candidates.
//!
//! An engine owns all mutable state for one stream of ticks. Independent
//! streams use independent engines.

use sentinel_types::{AnomalyEvent, Entity, Zone};
use tracing::{debug, warn};

use crate::baseline::{self, BaselineTracker};
use crate::config::{DetectionConfig, SentinelConfig};
use crate::correlation;
use crate::detectors::{compression, loitering, restricted, speed};
use crate::history::HistoryTracker;
use crate::id_source::{AnomalyIdSource, UuidIdSource};
use crate::snapshot::normalize_snapshot;

/// Stateful anomaly detector for a single tick stream.
#[derive(Debug)]
pub struct AnomalyEngine<I = UuidIdSource> {
    detection: DetectionConfig,
    baselines: Box<dyn BaselineTracker>,
    history: HistoryTracker,
    ids: I,
    last_timestamp: Option<f64>,
}

impl AnomalyEngine {
    /// Build an engine that mints UUID v7 anomaly ids.
    pub fn new(config: &SentinelConfig) -> Self {
        Self::with_ids(config, UuidIdSource)
    }
}

impl<I: AnomalyIdSource> AnomalyEngine<I> {
    /// Build an engine with a caller-supplied id source.
    pub fn with_ids(config: &SentinelConfig, ids: I) -> Self {
        Self::with_parts(
            config.detection.clone(),
            baseline::from_config(&config.baseline),
            ids,
        )
    }

    /// Build an engine from explicit parts.
    pub fn with_parts(
        detection: DetectionConfig,
        baselines: Box<dyn BaselineTracker>,
        ids: I,
    ) -> Self {
        Self {
            detection,
            baselines,
            history: HistoryTracker::new(),
            ids,
            last_timestamp: None,
        }
    }

    /// The throttle knobs this engine was configured with.
    ///
    /// They are carried for the driver's benefit; detection does not
    /// consult them.
    pub const fn detection(&self) -> &DetectionConfig {
        &self.detection
    }

    /// Position history accumulated so far.
    pub const fn history(&self) -> &HistoryTracker {
        &self.history
    }

    /// Current baseline density for `zone`.
    pub fn baseline(&self, zone: &str) -> f64 {
        self.baselines.density(zone)
    }

    /// Run one tick and return its anomalies in emission order.
    pub fn detect(
        &mut self,
        entities: &[Entity],
        zones: &[Zone],
        timestamp: f64,
    ) -> Vec<AnomalyEvent> {
        let regressed = self.last_timestamp.filter(|&p| timestamp < p);
        match regressed {
            Some(previous) => {
                warn!(previous, timestamp, "tick timestamp went backwards, history not recorded");
            }
            None => self.last_timestamp = Some(timestamp),
        }

        let snapshot = normalize_snapshot(entities, timestamp);

        self.baselines.update(&snapshot.entities, zones);

        // Windows stay in ascending time order.
        if regressed.is_none() {
            for person in snapshot.people() {
                self.history.record(&person.id, timestamp, person.position);
            }
        }

        let mut anomalies = Vec::new();

        for zone in zones {
            let baseline = self.baselines.density(zone.name());
            if let Some(event) = compression::check(&snapshot, zone, baseline, &mut self.ids) {
                anomalies.push(event);
            }
        }
        anomalies.extend(speed::check(&snapshot, &mut self.ids));
        anomalies.extend(loitering::check(&snapshot, &self.history, &mut self.ids));
        anomalies.extend(restricted::check(&snapshot, zones, &mut self.ids));

        let summary = correlation::apply_rule_of_three(&mut anomalies);

        debug!(
            timestamp,
            entities = snapshot.entities.len(),
            rejected = snapshot.rejected,
            anomalies = anomalies.len(),
            clusters = summary.clusters,
            escalated_clusters = summary.escalated_clusters,
            escalated = summary.escalated_anomalies,
            "Tick evaluated"
        );

        anomalies
    }
}
