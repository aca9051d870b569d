//! The anomaly event record emitted by the engine.
//!
//! Field names on the wire are fixed: downstream consumers (API layer,
//! dashboard) key on `anomalyId`, `ruleOfThreeHit`, `relatedAnomalies` and
//! the rest exactly as serialized here.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::geometry::Vec3;
use crate::ids::AnomalyId;

/// Zone label used when an event cannot be attributed to a zone.
pub const UNKNOWN_ZONE: &str = "UNKNOWN";

/// Coarse cause family of an anomaly. Rule-of-Three escalation counts
/// distinct categories, not subtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum AnomalyCategory {
    /// Where people are: density and access.
    Geographics,
    /// How people move.
    Kinetics,
    /// How people behave over time.
    Atmospherics,
}

/// The specific rule that produced an anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum AnomalySubtype {
    /// Zone density above the crush-risk threshold.
    CrowdCompression,
    /// Horizontal speed above the role ceiling.
    SpeedViolation,
    /// Prolonged presence inside a small area.
    Loitering,
    /// Non-player presence inside a restricted zone.
    RestrictedZoneEntry,
}

impl AnomalySubtype {
    /// The category this subtype always belongs to.
    pub const fn category(self) -> AnomalyCategory {
        match self {
            Self::CrowdCompression | Self::RestrictedZoneEntry => AnomalyCategory::Geographics,
            Self::SpeedViolation => AnomalyCategory::Kinetics,
            Self::Loitering => AnomalyCategory::Atmospherics,
        }
    }
}

/// Urgency of an anomaly, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum Severity {
    /// Worth noting.
    Low,
    /// Needs a look.
    Medium,
    /// Needs a response.
    High,
    /// Needs an immediate response.
    Critical,
}

/// Quantitative summary attached to every anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AnomalyMetrics {
    /// Deviation from the expected value, in percent.
    pub baseline_delta: f64,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f64,
    /// Composite risk in `[0, 100]`.
    pub risk_score: f64,
}

/// A single detected anomaly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AnomalyEvent {
    /// Unique per creation.
    pub anomaly_id: AnomalyId,
    /// Cause family.
    pub category: AnomalyCategory,
    /// Producing rule.
    pub subtype: AnomalySubtype,
    /// Urgency; may be raised to critical by correlation.
    pub severity: Severity,
    /// Scenario tag for consumers (`"CRUSH"` for compression events).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub scenario: Option<String>,
    /// One-line summary.
    pub headline: String,
    /// Longer summary.
    pub description: String,
    /// What normal looks like.
    pub baseline_text: String,
    /// What was observed.
    pub anomaly_text: String,
    /// Zone name, or [`UNKNOWN_ZONE`].
    pub zone: String,
    /// Point used for correlation distance.
    pub location: Vec3,
    /// Implicated entities (never empty).
    pub entity_ids: Vec<String>,
    /// Quantitative summary.
    pub metrics: AnomalyMetrics,
    /// Timestamp of the tick that produced the event, in seconds.
    pub occurred_at: f64,
    /// Whether correlation escalated this event.
    pub rule_of_three_hit: bool,
    /// Other members of the escalated cluster, if escalated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub related_anomalies: Option<Vec<AnomalyId>>,
}

impl AnomalyEvent {
    /// Mark this event as part of a Rule-of-Three cluster.
    ///
    /// Severity is forced to [`Severity::Critical`] regardless of its
    /// previous value.
    pub fn escalate(&mut self, related: Vec<AnomalyId>) {
        self.severity = Severity::Critical;
        self.rule_of_three_hit = true;
        self.related_anomalies = Some(related);
    }
}
