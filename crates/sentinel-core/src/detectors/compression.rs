//! Crowd-compression detection.
//!
//! A zone fires when its density exceeds both a multiple of its baseline
//! and an absolute crush-risk floor. One event is emitted per zone, naming
//! every entity inside the zone rectangle.

use sentinel_types::{AnomalyEvent, AnomalyMetrics, AnomalySubtype, Entity, Severity, Zone};
use tracing::debug;

use super::Draft;
use crate::id_source::AnomalyIdSource;
use crate::snapshot::Snapshot;

/// Density must exceed this multiple of the baseline.
pub const BASELINE_MULTIPLIER: f64 = 2.5;

/// Density floor (entities/m²) below which compression never fires.
pub const CRUSH_RISK_DENSITY: f64 = 4.0;

/// Density above which a compression event is critical.
pub const CRITICAL_DENSITY: f64 = 6.0;

/// Detector confidence.
pub const CONFIDENCE: f64 = 0.95;

/// Risk score contributed per entity/m².
pub const RISK_PER_DENSITY: f64 = 15.0;

/// Scenario tag attached to compression events.
pub const SCENARIO_TAG: &str = "CRUSH";

/// Density threshold for a zone with the given baseline.
pub fn threshold(baseline: f64) -> f64 {
    (baseline * BASELINE_MULTIPLIER).max(CRUSH_RISK_DENSITY)
}

/// Evaluate one zone.
pub fn check(
    snapshot: &Snapshot<'_>,
    zone: &Zone,
    baseline: f64,
    ids: &mut impl AnomalyIdSource,
) -> Option<AnomalyEvent> {
    let inside: Vec<&Entity> = snapshot
        .entities
        .iter()
        .copied()
        .filter(|e| zone.contains(e.position))
        .collect();
    if inside.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let density = inside.len() as f64 / zone.area();
    let limit = threshold(baseline);
    if density <= limit {
        return None;
    }

    let severity = if density > CRITICAL_DENSITY {
        Severity::Critical
    } else {
        Severity::High
    };
    let ratio = density / baseline;

    debug!(
        zone = zone.name(),
        density,
        baseline,
        threshold = limit,
        ?severity,
        "crowd compression"
    );

    let draft = Draft {
        subtype: AnomalySubtype::CrowdCompression,
        severity,
        scenario: Some(SCENARIO_TAG),
        headline: format!("{} Crowd Compression Risk", zone.name()),
        description: format!("Density {density:.1} people/m², {ratio:.1}× baseline"),
        baseline_text: format!("Normal density: {baseline:.1} people/m²"),
        anomaly_text: format!(
            "Current density: {density:.1} people/m² ({} in {:.0}m²)",
            inside.len(),
            zone.area()
        ),
        zone: zone.name().to_owned(),
        location: zone.center(),
        entity_ids: inside.iter().map(|e| e.id.clone()).collect(),
        metrics: AnomalyMetrics {
            baseline_delta: (ratio - 1.0) * 100.0,
            confidence: CONFIDENCE,
            risk_score: (density * RISK_PER_DENSITY).min(100.0),
        },
    };
    Some(draft.emit(ids, snapshot.timestamp))
}
