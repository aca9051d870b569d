//! End-to-end tests for [`AnomalyEngine::detect`] across multiple ticks.
//!
//! Every engine here uses [`SequentialIdSource`] so output is fully
//! deterministic.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::arithmetic_side_effects
)]

use sentinel_core::baseline::DEFAULT_SEED_DENSITY;
use sentinel_core::history::HISTORY_WINDOW_SECS;
use sentinel_core::id_source::SequentialIdSource;
use sentinel_core::{AnomalyEngine, SentinelConfig};
use sentinel_types::{
    AnomalyCategory, AnomalyEvent, AnomalySubtype, Bounds, Entity, EntityKind, Role, Severity,
    Vec3, Zone, ZoneKind,
};
use sentinel_venue::Venue;

fn engine() -> AnomalyEngine<SequentialIdSource> {
    AnomalyEngine::with_ids(&SentinelConfig::default(), SequentialIdSource::new())
}

fn spectator(id: &str, x: f64, y: f64) -> Entity {
    Entity::new(id, EntityKind::Person, Role::Spectator, Vec3::new(x, y, 0.0))
}

/// `n` stationary spectators packed into the home bench (0,0)-(5,2).
fn bench_crowd(n: usize) -> Vec<Entity> {
    (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let (col, row) = ((i % 10) as f64, (i / 10) as f64);
            spectator(&format!("fan-{i}"), col.mul_add(0.5, 0.1), row.mul_add(0.25, 0.1))
        })
        .collect()
}

fn gate() -> Zone {
    Zone::new(
        "GATE",
        Bounds::new(4.0, 4.0, 8.0, 8.0),
        16.0,
        ZoneKind::Restricted,
    )
    .unwrap()
}

#[test]
fn empty_input_produces_no_anomalies() {
    let venue = Venue::for_sport_name("SOCCER").unwrap();
    let mut engine = engine();
    for t in 0..5 {
        assert!(engine.detect(&[], venue.zones(), f64::from(t)).is_empty());
    }
}

#[test]
fn identical_inputs_give_identical_output() {
    let venue = Venue::for_sport_name("BASKETBALL").unwrap();
    let crowd = bench_crowd(45);
    let mut a = engine();
    let mut b = engine();
    for t in 0..3 {
        let ts = f64::from(t);
        assert_eq!(
            a.detect(&crowd, venue.zones(), ts),
            b.detect(&crowd, venue.zones(), ts)
        );
    }
}

#[test]
fn bench_crush_escalates_with_crowd_size() {
    let venue = Venue::for_sport_name("BASKETBALL").unwrap();
    let mut engine = engine();

    assert!(engine.detect(&bench_crowd(40), venue.zones(), 0.0).is_empty());

    let high = engine.detect(&bench_crowd(41), venue.zones(), 1.0);
    assert_eq!(high.len(), 1);
    let event = &high[0];
    assert_eq!(event.subtype, AnomalySubtype::CrowdCompression);
    assert_eq!(event.category, AnomalyCategory::Geographics);
    assert_eq!(event.severity, Severity::High);
    assert_eq!(event.zone, "HOME_BENCH");
    assert_eq!(event.scenario.as_deref(), Some("CRUSH"));
    assert_eq!(event.entity_ids.len(), 41);
    assert!((event.metrics.baseline_delta - 310.0).abs() < 1e-9);
    assert!((event.location.x - 2.5).abs() < 1e-9);
    assert!((event.location.y - 1.0).abs() < 1e-9);

    let critical = engine.detect(&bench_crowd(70), venue.zones(), 2.0);
    assert_eq!(critical.len(), 1);
    assert_eq!(critical[0].severity, Severity::Critical);
    assert!(!critical[0].rule_of_three_hit);
}

#[test]
fn seeded_baseline_survives_later_ticks() {
    let venue = Venue::for_sport_name("BASKETBALL").unwrap();
    let mut engine = engine();
    let _ = engine.detect(&[], venue.zones(), 0.0);
    let _ = engine.detect(&bench_crowd(70), venue.zones(), 1.0);
    let _ = engine.detect(&bench_crowd(70), venue.zones(), 2.0);
    assert_eq!(engine.baseline("HOME_BENCH"), DEFAULT_SEED_DENSITY);
    assert_eq!(engine.baseline("COURT"), DEFAULT_SEED_DENSITY);
}

#[test]
fn history_is_pruned_once_window_passes() {
    let mut engine = engine();
    let walker = [spectator("w", 1.0, 1.0)];
    let _ = engine.detect(&walker, &[], 0.0);
    let _ = engine.detect(&walker, &[], 1.0);
    assert_eq!(engine.history().window("w").len(), 2);

    let _ = engine.detect(&walker, &[], 1.0 + HISTORY_WINDOW_SECS + 0.5);
    let window = engine.history().window("w");
    assert_eq!(window.len(), 1);
    assert_eq!(window[0].timestamp, 1.0 + HISTORY_WINDOW_SECS + 0.5);
}

#[test]
fn loitering_needs_thirty_ticks() {
    let mut engine = engine();
    let idler = [spectator("idle", 50.0, 50.0)];

    for t in 0..29 {
        assert!(engine.detect(&idler, &[], f64::from(t)).is_empty());
    }
    let fired = engine.detect(&idler, &[], 29.0);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].subtype, AnomalySubtype::Loitering);
    assert_eq!(fired[0].severity, Severity::Low);
    assert_eq!(fired[0].zone, "UNKNOWN");
    assert_eq!(fired[0].anomaly_text, "Stationary duration: 29.0s");
}

#[test]
fn restricted_entry_exempts_players_only() {
    let venue = Venue::for_sport_name("COMBAT").unwrap();
    let mut engine = engine();
    let outside_ring = Vec3::new(-1.0, -1.0, 0.0);

    let player = [Entity::new("p", EntityKind::Person, Role::Player, outside_ring)];
    assert!(engine.detect(&player, venue.zones(), 0.0).is_empty());

    let fan = [Entity::new("s", EntityKind::Person, Role::Spectator, outside_ring)];
    let fired = engine.detect(&fan, venue.zones(), 1.0);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].subtype, AnomalySubtype::RestrictedZoneEntry);
    assert_eq!(fired[0].severity, Severity::High);
    assert_eq!(fired[0].zone, "RINGSIDE");
    assert_eq!(fired[0].anomaly_text, "SPECTATOR entity detected in zone");
}

/// Run the converging scenario: an idler standing in a restricted gate
/// for 30 ticks, joined on the last tick by a nearby runner and a second
/// runner 11 m further out. Returns the final tick's anomalies.
fn converging_final_tick(engine: &mut AnomalyEngine<SequentialIdSource>) -> Vec<AnomalyEvent> {
    let zones = [gate()];
    let idler = spectator("idle", 5.0, 5.0);

    for t in 0..29 {
        let early = engine.detect(std::slice::from_ref(&idler), &zones, f64::from(t));
        assert_eq!(early.len(), 1);
        assert!(!early[0].rule_of_three_hit);
    }

    let runner = spectator("runner", 12.0, 5.0).with_velocity(Vec3::new(4.0, 0.0, 0.0));
    let far = spectator("far", 23.0, 5.0).with_velocity(Vec3::new(0.0, 4.0, 0.0));
    engine.detect(&[idler, runner, far], &zones, 29.0)
}

#[test]
fn rule_of_three_escalates_converging_categories() {
    let mut engine = engine();
    let anomalies = converging_final_tick(&mut engine);

    let subtypes: Vec<AnomalySubtype> = anomalies.iter().map(|a| a.subtype).collect();
    assert_eq!(
        subtypes,
        vec![
            AnomalySubtype::SpeedViolation,
            AnomalySubtype::SpeedViolation,
            AnomalySubtype::Loitering,
            AnomalySubtype::RestrictedZoneEntry,
        ]
    );

    let escalated: Vec<&AnomalyEvent> = anomalies
        .iter()
        .filter(|a| a.entity_ids != ["far"])
        .collect();
    assert_eq!(escalated.len(), 3);
    for event in &escalated {
        assert_eq!(event.severity, Severity::Critical);
        assert!(event.rule_of_three_hit);
        let related = event.related_anomalies.as_ref().unwrap();
        assert_eq!(related.len(), 2);
        assert!(!related.contains(&event.anomaly_id));
        for other in &escalated {
            if other.anomaly_id != event.anomaly_id {
                assert!(related.contains(&other.anomaly_id));
            }
        }
    }

    let far = &anomalies[1];
    assert_eq!(far.entity_ids, vec!["far".to_owned()]);
    assert_eq!(far.severity, Severity::Medium);
    assert!(!far.rule_of_three_hit);
    assert!(far.related_anomalies.is_none());
}

#[test]
fn escalated_events_serialize_related_ids() {
    let mut engine = engine();
    let anomalies = converging_final_tick(&mut engine);

    let hit = serde_json::to_value(&anomalies[0]).unwrap();
    assert_eq!(hit["severity"], "CRITICAL");
    assert_eq!(hit["ruleOfThreeHit"], true);
    assert_eq!(hit["relatedAnomalies"].as_array().unwrap().len(), 2);

    let miss = serde_json::to_value(&anomalies[1]).unwrap();
    assert_eq!(miss["ruleOfThreeHit"], false);
    assert!(miss.get("relatedAnomalies").is_none());
}

/// Clustering compares against each cluster's first member only. Three
/// restricted-zone intruders 8 m apart in a line are all GEOGRAPHICS, so
/// this pins the grouping itself: the far end does not chain through the
/// middle one into the first cluster.
#[test]
fn clustering_is_greedy_against_representatives() {
    let corridor = Zone::new(
        "CORRIDOR",
        Bounds::new(-1.0, -1.0, 20.0, 1.0),
        42.0,
        ZoneKind::Restricted,
    )
    .unwrap();
    let intruders = [
        spectator("a", 0.0, 0.0),
        spectator("b", 8.0, 0.0),
        spectator("c", 16.0, 0.0),
    ];
    let anomalies = engine().detect(&intruders, std::slice::from_ref(&corridor), 0.0);
    assert_eq!(anomalies.len(), 3);
    assert_eq!(
        sentinel_core::correlation::cluster(&anomalies),
        vec![vec![0, 1], vec![2]]
    );
}

#[test]
fn throttle_knobs_do_not_suppress_anomalies() {
    let config = SentinelConfig::parse(
        "detection:\n  anomaly_rate_per_minute: 0.5\n  min_anomaly_interval_secs: 600.0\n",
    )
    .unwrap();
    let mut engine = AnomalyEngine::with_ids(&config, SequentialIdSource::new());
    let runner = [spectator("r", 0.0, 0.0).with_velocity(Vec3::new(5.0, 0.0, 0.0))];
    for t in 0..3 {
        assert_eq!(engine.detect(&runner, &[], f64::from(t)).len(), 1);
    }
    assert_eq!(engine.detection().min_anomaly_interval_secs, 600.0);
}
