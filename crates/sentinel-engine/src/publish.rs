//! Anomaly publication as JSON lines.
//!
//! Each anomaly is wrapped in an [`Envelope`] carrying the session id and
//! the wall-clock send time, then written as one line.

use std::io::Write;

use chrono::{DateTime, Utc};
use sentinel_types::AnomalyEvent;
use serde::Serialize;

use crate::error::EngineError;

/// One published anomaly.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<'a> {
    /// Monitoring session the anomaly belongs to.
    pub session_id: &'a str,
    /// When the envelope was written.
    pub sent_at: DateTime<Utc>,
    /// The anomaly itself.
    pub anomaly: &'a AnomalyEvent,
}

/// Writes envelopes to an output stream, one per line.
#[derive(Debug)]
pub struct Publisher<W> {
    out: W,
    session_id: String,
    published: usize,
}

impl<W: Write> Publisher<W> {
    /// Publish to `out` under `session_id`.
    pub fn new(out: W, session_id: impl Into<String>) -> Self {
        Self {
            out,
            session_id: session_id.into(),
            published: 0,
        }
    }

    /// Write one anomaly.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if serialization or the write fails.
    pub fn publish(&mut self, anomaly: &AnomalyEvent) -> Result<(), EngineError> {
        let envelope = Envelope {
            session_id: &self.session_id,
            sent_at: Utc::now(),
            anomaly,
        };
        serde_json::to_writer(&mut self.out, &envelope)?;
        self.out.write_all(b"\n")?;
        self.published = self.published.saturating_add(1);
        Ok(())
    }

    /// Envelopes written so far.
    pub const fn published(&self) -> usize {
        self.published
    }

    /// Session id stamped on every envelope.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Flush and return the underlying stream.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Io`] if the flush fails.
    pub fn finish(mut self) -> Result<W, EngineError> {
        self.out.flush()?;
        Ok(self.out)
    }
}
