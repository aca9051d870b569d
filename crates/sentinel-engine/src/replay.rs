//! Tick-file replay.
//!
//! A tick file is JSON lines. Each line is one tick:
//!
//! ```json
//! {"timestamp": 12.5, "entities": [{"id": "fan-1", "type": "PERSON", "position": {"x": 1, "y": 2}}]}
//! ```
//!
//! The first non-blank line may instead be a header that replaces the
//! configured sport preset with an explicit zone list:
//!
//! ```json
//! {"zones": [{"name": "GATE", "bounds": {"xMin": 0, "yMin": 0, "xMax": 4, "yMax": 4}, "area": 16, "type": "RESTRICTED"}]}
//! ```
//!
//! Blank lines are ignored. A line that fails to parse is logged and
//! skipped; the replay continues with the next line. Entities are decoded
//! one at a time, so a malformed entity is logged and dropped from its
//! tick while its siblings are still evaluated.

use std::io::{BufRead, Write};

use sentinel_core::config::SentinelConfig;
use sentinel_core::id_source::AnomalyIdSource;
use sentinel_core::AnomalyEngine;
use sentinel_types::{Entity, Zone};
use sentinel_venue::Venue;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::publish::Publisher;

/// One tick of input.
#[derive(Debug, Clone, Deserialize)]
pub struct Tick {
    /// Tick time in seconds.
    pub timestamp: f64,
    /// Entities present this tick, still undecoded.
    #[serde(default)]
    pub entities: Vec<serde_json::Value>,
}

/// Zone list override, allowed only as the first line.
#[derive(Debug, Clone, Deserialize)]
pub struct Header {
    /// The venue's zones.
    pub zones: Vec<Zone>,
}

/// Counters for a finished replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Ticks evaluated.
    pub ticks: usize,
    /// Lines skipped as malformed.
    pub skipped: usize,
    /// Entities dropped from otherwise valid ticks.
    pub rejected_entities: usize,
    /// Anomalies published.
    pub anomalies: usize,
    /// Published anomalies escalated by the Rule of Three.
    pub escalated: usize,
}

/// Whether a parsed line has the shape of a zone header.
pub fn is_header(value: &serde_json::Value) -> bool {
    value.get("zones").is_some() && value.get("timestamp").is_none()
}

/// The configured sport preset.
///
/// # Errors
///
/// Returns [`EngineError::Venue`] if the sport is unknown.
pub fn preset_venue(config: &SentinelConfig) -> Result<Venue, EngineError> {
    Ok(Venue::for_sport_name(&config.venue.sport)?)
}

/// Decode each entity on its own. Records that fail are logged and
/// counted, and the rest are returned in input order.
pub fn decode_entities(raw: Vec<serde_json::Value>, line_no: usize) -> (Vec<Entity>, usize) {
    let mut entities = Vec::with_capacity(raw.len());
    let mut rejected: usize = 0;

    for (index, value) in raw.into_iter().enumerate() {
        let id = value
            .get("id")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("?")
            .to_owned();
        match serde_json::from_value::<Entity>(value) {
            Ok(entity) => entities.push(entity),
            Err(e) => {
                rejected = rejected.saturating_add(1);
                warn!(line = line_no, index, entity_id = %id, error = %e, "Skipping malformed entity");
            }
        }
    }

    (entities, rejected)
}

/// Replay every tick in `input` through `engine`, publishing each anomaly.
///
/// # Errors
///
/// Returns [`EngineError`] on read or write failure, an invalid header
/// zone list, or an unknown preset sport. Malformed tick lines are not
/// errors.
pub fn run<I, R, W>(
    config: &SentinelConfig,
    engine: &mut AnomalyEngine<I>,
    input: R,
    publisher: &mut Publisher<W>,
) -> Result<ReplaySummary, EngineError>
where
    I: AnomalyIdSource,
    R: BufRead,
    W: Write,
{
    let mut summary = ReplaySummary::default();
    let mut zones: Option<Vec<Zone>> = None;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line_no = index.saturating_add(1);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let value: serde_json::Value = match serde_json::from_str(trimmed) {
            Ok(value) => value,
            Err(e) => {
                summary.skipped = summary.skipped.saturating_add(1);
                warn!(line = line_no, error = %e, "Skipping malformed tick line");
                continue;
            }
        };

        if zones.is_none() && is_header(&value) {
            let header: Header = serde_json::from_value(value)?;
            let venue = Venue::custom(header.zones)?;
            info!(
                zone_count = venue.zones().len(),
                restricted = venue.restricted_zones().count(),
                "Using zones from tick file header"
            );
            zones = Some(venue.into_zones());
            continue;
        }

        let tick: Tick = match serde_json::from_value(value) {
            Ok(tick) => tick,
            Err(e) => {
                summary.skipped = summary.skipped.saturating_add(1);
                warn!(line = line_no, error = %e, "Skipping malformed tick line");
                continue;
            }
        };

        if zones.is_none() {
            let venue = preset_venue(config)?;
            info!(
                sport = ?venue.sport(),
                zone_count = venue.zones().len(),
                restricted = venue.restricted_zones().count(),
                "Using preset zones"
            );
            zones = Some(venue.into_zones());
        }
        let active = zones.as_deref().unwrap_or_default();

        let (entities, rejected) = decode_entities(tick.entities, line_no);
        summary.rejected_entities = summary.rejected_entities.saturating_add(rejected);

        let anomalies = engine.detect(&entities, active, tick.timestamp);
        debug!(
            line = line_no,
            timestamp = tick.timestamp,
            anomalies = anomalies.len(),
            "Tick replayed"
        );
        for anomaly in &anomalies {
            publisher.publish(anomaly)?;
            if anomaly.rule_of_three_hit {
                summary.escalated = summary.escalated.saturating_add(1);
            }
        }
        summary.ticks = summary.ticks.saturating_add(1);
        summary.anomalies = summary.anomalies.saturating_add(anomalies.len());
    }

    Ok(summary)
}
