//! Named venue regions used for density and access checks.
//!
//! A [`Zone`] can only be built through [`Zone::new`] (or deserialized,
//! which goes through the same checks), so every zone that reaches the
//! engine has a strictly positive area and well-ordered bounds.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ZoneError;
use crate::geometry::{Bounds, Vec3};

/// Classification of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum ZoneKind {
    /// Playing surface.
    Field,
    /// Team bench area.
    Bench,
    /// Access-controlled area; only players may enter.
    Restricted,
    /// Combat-sport ring.
    Ring,
    /// Any classification this engine has no rule for.
    #[serde(other)]
    Other,
}

/// Raw zone definition as it appears in configuration or tick files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ZoneSpec {
    /// Unique name within the venue.
    pub name: String,
    /// Rectangle covered by the zone.
    pub bounds: Bounds,
    /// Area in square meters.
    pub area: f64,
    /// Classification.
    #[serde(alias = "type")]
    pub kind: ZoneKind,
}

/// A validated venue zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ZoneSpec")]
pub struct Zone {
    name: String,
    bounds: Bounds,
    area: f64,
    kind: ZoneKind,
}

impl Zone {
    /// Build a zone, rejecting unusable geometry.
    ///
    /// `area` is taken as given rather than derived from `bounds` so that
    /// irregular regions can be approximated by their bounding rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError`] for an empty name, non-finite or inverted
    /// bounds, or an area that is not strictly positive.
    pub fn new(
        name: impl Into<String>,
        bounds: Bounds,
        area: f64,
        kind: ZoneKind,
    ) -> Result<Self, ZoneError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ZoneError::EmptyName);
        }
        if !bounds.is_finite() {
            return Err(ZoneError::NonFiniteBounds { name });
        }
        if bounds.x_min > bounds.x_max || bounds.y_min > bounds.y_max {
            return Err(ZoneError::InvertedBounds { name });
        }
        // NaN fails this comparison too.
        if !(area > 0.0 && area.is_finite()) {
            return Err(ZoneError::NonPositiveArea { name, area });
        }
        Ok(Self {
            name,
            bounds,
            area,
            kind,
        })
    }

    /// Zone name, unique within its venue.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rectangle covered by the zone.
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Area in square meters (always > 0).
    pub const fn area(&self) -> f64 {
        self.area
    }

    /// Classification.
    pub const fn kind(&self) -> ZoneKind {
        self.kind
    }

    /// Midpoint of the bounds at floor level.
    pub fn center(&self) -> Vec3 {
        self.bounds.center()
    }

    /// Whether `point` falls inside the zone rectangle (edges inclusive).
    pub fn contains(&self, point: Vec3) -> bool {
        self.bounds.contains(point)
    }

    /// Whether only players are allowed inside.
    pub fn is_restricted(&self) -> bool {
        self.kind == ZoneKind::Restricted
    }
}

impl TryFrom<ZoneSpec> for Zone {
    type Error = ZoneError;

    fn try_from(spec: ZoneSpec) -> Result<Self, Self::Error> {
        Self::new(spec.name, spec.bounds, spec.area, spec.kind)
    }
}
