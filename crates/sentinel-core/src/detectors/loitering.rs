//! Loitering detection.
//!
//! Reads each person's rolling history. A person loiters when enough
//! samples have accumulated, all of them fit inside a small box, and they
//! span more than the dwell threshold. No cooldown is applied: the rule
//! keeps firing on every tick the condition holds.

use sentinel_types::{
    AnomalyEvent, AnomalyMetrics, AnomalySubtype, Bounds, Severity, UNKNOWN_ZONE,
};
use tracing::debug;

use super::Draft;
use crate::history::HistoryTracker;
use crate::id_source::AnomalyIdSource;
use crate::snapshot::Snapshot;

/// Samples required before the rule is evaluated (about ten seconds at the
/// driver's usual cadence; the detector does not measure cadence itself).
pub const MIN_SAMPLES: usize = 30;

/// Both sides of the movement box must be shorter than this, in meters.
pub const MAX_EXTENT_M: f64 = 3.0;

/// Oldest-to-newest span must exceed this, in seconds.
pub const MIN_DWELL_SECS: f64 = 15.0;

/// Detector confidence.
pub const CONFIDENCE: f64 = 0.85;

/// Fixed risk score.
pub const RISK_SCORE: f64 = 40.0;

/// Fixed baseline delta, in percent.
pub const BASELINE_DELTA: f64 = 50.0;

/// Evaluate every person present this tick against their history.
pub fn check(
    snapshot: &Snapshot<'_>,
    history: &HistoryTracker,
    ids: &mut impl AnomalyIdSource,
) -> Vec<AnomalyEvent> {
    let mut events = Vec::new();

    for entity in snapshot.people() {
        let window = history.window(&entity.id);
        if window.len() < MIN_SAMPLES {
            continue;
        }
        let (Some(oldest), Some(newest)) = (window.first(), window.last()) else {
            continue;
        };
        let Some(extent) = Bounds::enclosing(window.iter().map(|s| s.position)) else {
            continue;
        };

        let dwell = newest.timestamp - oldest.timestamp;
        if extent.width() >= MAX_EXTENT_M || extent.height() >= MAX_EXTENT_M || dwell <= MIN_DWELL_SECS
        {
            continue;
        }

        debug!(
            entity_id = %entity.id,
            samples = window.len(),
            dwell,
            width = extent.width(),
            height = extent.height(),
            "loitering"
        );

        let draft = Draft {
            subtype: AnomalySubtype::Loitering,
            severity: Severity::Low,
            scenario: None,
            headline: format!("Loitering Detected: {}", entity.id),
            description: "Entity remained in 3m radius for > 15s".to_owned(),
            baseline_text: "Normal transit time: < 10s".to_owned(),
            anomaly_text: format!("Stationary duration: {dwell:.1}s"),
            zone: UNKNOWN_ZONE.to_owned(),
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

    events
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use sentinel_types::{AnomalyCategory, Entity, EntityKind, Role, Vec3};

    use super::*;
    use crate::detectors::fixtures::person;
    use crate::id_source::SequentialIdSource;
    use crate::snapshot::normalize_snapshot;

    /// Record `n` samples for `id`, evenly spaced over `span` seconds,
    /// alternating between two corners of a `side` x `side` box.
    fn dwell(history: &mut HistoryTracker, id: &str, n: u32, span: f64, side: f64) -> f64 {
        let step = span / f64::from(n - 1);
        let mut t = 0.0;
        for i in 0..n {
            t = f64::from(i) * step;
            let corner = if i % 2 == 0 { 0.0 } else { side };
            history.record(id, t, Vec3::new(10.0 + corner, 10.0 + corner, 0.0));
        }
        t
    }

    fn run(history: &HistoryTracker, entities: &[Entity], now: f64) -> Vec<AnomalyEvent> {
        let snapshot = normalize_snapshot(entities, now);
        check(&snapshot, history, &mut SequentialIdSource::new())
    }

    #[test]
    fn twenty_nine_samples_never_fire() {
        let mut history = HistoryTracker::new();
        let now = dwell(&mut history, "p1", 29, 40.0, 0.0);
        let entities = [person("p1", Role::Spectator, 10.0, 10.0)];
        assert!(run(&history, &entities, now).is_empty());
    }

    #[test]
    fn thirty_samples_in_small_box_over_dwell_fire_low() {
        let mut history = HistoryTracker::new();
        let now = dwell(&mut history, "p1", 30, 15.1, 2.9);
        let entities = [person("p1", Role::Spectator, 12.0, 12.0)];
        let events = run(&history, &entities, now);

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.severity, Severity::Low);
        assert_eq!(event.category, AnomalyCategory::Atmospherics);
        assert_eq!(event.subtype, AnomalySubtype::Loitering);
        assert_eq!(event.zone, "UNKNOWN");
        assert_eq!(event.location, Vec3::new(12.0, 12.0, 0.0));
        assert!((event.metrics.baseline_delta - 50.0).abs() < f64::EPSILON);
        assert!((event.metrics.risk_score - 40.0).abs() < f64::EPSILON);
        assert_eq!(event.anomaly_text, "Stationary duration: 15.1s");
    }

    #[test]
    fn dwell_at_threshold_does_not_fire() {
        let mut history = HistoryTracker::new();
        let now = dwell(&mut history, "p1", 31, 15.0, 1.0);
        let entities = [person("p1", Role::Spectator, 10.0, 10.0)];
        assert!(run(&history, &entities, now).is_empty());
    }

    #[test]
    fn wide_movement_does_not_fire() {
        let mut history = HistoryTracker::new();
        let now = dwell(&mut history, "p1", 40, 20.0, 3.0);
        let entities = [person("p1", Role::Spectator, 10.0, 10.0)];
        assert!(run(&history, &entities, now).is_empty());
    }

    #[test]
    fn absent_entities_are_not_evaluated() {
        let mut history = HistoryTracker::new();
        let now = dwell(&mut history, "gone", 30, 20.0, 0.5);
        let entities = [person("other", Role::Spectator, 0.0, 0.0)];
        assert!(run(&history, &entities, now).is_empty());
    }

    #[test]
    fn non_person_entities_are_not_evaluated() {
        let mut history = HistoryTracker::new();
        let now = dwell(&mut history, "crowd", 30, 20.0, 0.5);
        let entities = [Entity::new(
            "crowd",
            EntityKind::Group,
            Role::Spectator,
            Vec3::new(10.0, 10.0, 0.0),
        )];
        assert!(run(&history, &entities, now).is_empty());
    }
}
