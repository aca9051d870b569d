//! Restricted-zone entry detection.
//!
//! A binary presence rule: every non-player inside a restricted zone
//! produces one event per zone, regardless of how many others are there.

use sentinel_types::{AnomalyEvent, AnomalyMetrics, AnomalySubtype, Role, Severity, Zone};
use tracing::debug;

use super::Draft;
use crate::id_source::AnomalyIdSource;
use crate::snapshot::Snapshot;

/// Detector confidence.
pub const CONFIDENCE: f64 = 0.92;

/// Fixed risk score.
pub const RISK_SCORE: f64 = 75.0;

/// Fixed baseline delta, in percent.
pub const BASELINE_DELTA: f64 = 100.0;

/// Evaluate every restricted zone in `zones`, in zone order.
pub fn check(
    snapshot: &Snapshot<'_>,
    zones: &[Zone],
    ids: &mut impl AnomalyIdSource,
) -> Vec<AnomalyEvent> {
    let mut events = Vec::new();

    for zone in zones.iter().filter(|z| z.is_restricted()) {
        for entity in &snapshot.entities {
            if entity.role == Role::Player || !zone.contains(entity.position) {
                continue;
            }

            debug!(zone = zone.name(), entity_id = %entity.id, role = %entity.role, "restricted zone entry");

            let draft = Draft {
                subtype: AnomalySubtype::RestrictedZoneEntry,
                severity: Severity::High,
                scenario: None,
                headline: format!("Unauthorized Entry: {}", zone.name()),
                description: format!("{} entered restricted zone", entity.id),
                baseline_text: format!("Zone {} is restricted", zone.name()),
                anomaly_text: format!("{} entity detected in zone", entity.role),
                zone: zone.name().to_owned(),
                location: entity.position,
                entity_ids: vec![entity.id.clone()],
                metrics: AnomalyMetrics {
                    baseline_delta: BASELINE_DELTA,
                    confidence: CONFIDENCE,
                    risk_score: RISK_SCORE,
                },
            };
            events.push(draft.emit(ids, snapshot.timestamp));
        }
    }

    events
}
