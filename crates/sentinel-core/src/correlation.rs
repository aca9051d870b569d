//! Rule-of-Three spatiotemporal correlation.
//!
//! Candidates are grouped in a single greedy pass: each candidate, in
//! emission order, joins the first cluster whose *representative* (first
//! member) lies within [`SPATIAL_THRESHOLD_M`] and [`TEMPORAL_THRESHOLD_SECS`]
//! of it, or starts a new cluster. Candidates are never compared against
//! non-representative members, so the grouping depends on input order and
//! is not a transitive closure.
//!
//! A cluster whose members span at least [`MIN_DISTINCT_CATEGORIES`]
//! categories is escalated: every member becomes critical, is flagged, and
//! lists the other members' ids. Nothing is ever dropped.

use std::collections::BTreeSet;

use sentinel_types::{AnomalyCategory, AnomalyEvent, AnomalyId};
use tracing::info;

/// Planar distance below which two anomalies are co-located, in meters.
pub const SPATIAL_THRESHOLD_M: f64 = 10.0;

/// Time difference below which two anomalies are concurrent, in seconds.
pub const TEMPORAL_THRESHOLD_SECS: f64 = 30.0;

/// Distinct categories needed in one cluster to escalate it.
pub const MIN_DISTINCT_CATEGORIES: usize = 3;

/// Outcome of one correlation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorrelationSummary {
    /// Clusters formed.
    pub clusters: usize,
    /// Clusters escalated.
    pub escalated_clusters: usize,
    /// Anomalies escalated.
    pub escalated_anomalies: usize,
}

/// Whether `candidate` may join the cluster represented by `representative`.
fn is_near(candidate: &AnomalyEvent, representative: &AnomalyEvent) -> bool {
    let distance = candidate.location.planar_distance(representative.location);
    let elapsed = (candidate.occurred_at - representative.occurred_at).abs();
    distance < SPATIAL_THRESHOLD_M && elapsed < TEMPORAL_THRESHOLD_SECS
}

/// Group candidates into clusters of indices into `anomalies`.
///
/// The first index of each cluster is its representative.
pub fn cluster(anomalies: &[AnomalyEvent]) -> Vec<Vec<usize>> {
    let mut clusters: Vec<Vec<usize>> = Vec::new();

    for (index, candidate) in anomalies.iter().enumerate() {
        let home = clusters.iter_mut().find(|members| {
            members
                .first()
                .and_then(|&rep| anomalies.get(rep))
                .is_some_and(|rep| is_near(candidate, rep))
        });
        match home {
            Some(members) => members.push(index),
            None => clusters.push(vec![index]),
        }
    }

    clusters
}

/// Cluster `anomalies` and escalate every Rule-of-Three cluster in place.
pub fn apply_rule_of_three(anomalies: &mut [AnomalyEvent]) -> CorrelationSummary {
    let clusters = cluster(anomalies);
    let mut summary = CorrelationSummary {
        clusters: clusters.len(),
        ..CorrelationSummary::default()
    };

    for members in &clusters {
        let categories: BTreeSet<AnomalyCategory> = members
            .iter()
            .filter_map(|&i| anomalies.get(i).map(|a| a.category))
            .collect();
        if categories.len() < MIN_DISTINCT_CATEGORIES {
            continue;
        }

        let ids: Vec<AnomalyId> = members
            .iter()
            .filter_map(|&i| anomalies.get(i).map(|a| a.anomaly_id))
            .collect();

        for (position, &i) in members.iter().enumerate() {
            let related: Vec<AnomalyId> = ids
                .iter()
                .enumerate()
                .filter(|&(other, _)| other != position)
                .map(|(_, &id)| id)
                .collect();
            if let Some(anomaly) = anomalies.get_mut(i) {
                anomaly.escalate(related);
            }
        }

        summary.escalated_clusters = summary.escalated_clusters.saturating_add(1);
        summary.escalated_anomalies = summary.escalated_anomalies.saturating_add(members.len());
        info!(
            members = members.len(),
            categories = categories.len(),
            "rule of three: cluster escalated to critical"
        );
    }

    summary
}
