//! Speed-violation detection.
//!
//! Only horizontal speed counts; vertical motion (jumps, stairs) is
//! ignored. Kinetic events are not attributed to a zone.

use sentinel_types::{AnomalyEvent, AnomalyMetrics, AnomalySubtype, Role, Severity, UNKNOWN_ZONE};
use tracing::debug;

use super::Draft;
use crate::id_source::AnomalyIdSource;
use crate::snapshot::Snapshot;

/// A person fires once their speed exceeds this multiple of the ceiling.
pub const VIOLATION_FACTOR: f64 = 1.5;

/// Detector confidence.
pub const CONFIDENCE: f64 = 0.88;

/// Risk score contributed per m/s.
pub const RISK_PER_MPS: f64 = 8.0;

/// Expected top speed for a role, in m/s.
pub const fn ceiling(role: Role) -> f64 {
    match role {
        Role::Player => 10.0,
        Role::Official => 5.0,
        Role::Spectator | Role::Fighter => 2.0,
    }
}

/// Evaluate every person in the snapshot.
pub fn check(snapshot: &Snapshot<'_>, ids: &mut impl AnomalyIdSource) -> Vec<AnomalyEvent> {
    let mut events = Vec::new();

    for entity in snapshot.people() {
        let speed = entity.velocity.horizontal_norm();
        let max_speed = ceiling(entity.role);
        if speed <= max_speed * VIOLATION_FACTOR {
            continue;
        }

        let ratio = speed / max_speed;
        debug!(entity_id = %entity.id, speed, max_speed, role = %entity.role, "speed violation");

        let draft = Draft {
            subtype: AnomalySubtype::SpeedViolation,
            severity: Severity::Medium,
            scenario: None,
            headline: format!("Excessive Speed: {}", entity.id),
            description: format!("Entity moving at {speed:.1} m/s, {ratio:.1}× expected"),
            baseline_text: format!("Expected max speed: {max_speed:.1} m/s for {}", entity.role),
            anomaly_text: format!("Current speed: {speed:.1} m/s"),
            zone: UNKNOWN_ZONE.to_owned(),
            location: entity.position,
            entity_ids: vec![entity.id.clone()],
            metrics: AnomalyMetrics {
                baseline_delta: (ratio - 1.0) * 100.0,
                confidence: CONFIDENCE,
                risk_score: (speed * RISK_PER_MPS).min(100.0),
            },
        };
        events.push(draft.emit(ids, snapshot.timestamp));
    }

    events
}
