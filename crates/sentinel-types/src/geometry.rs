//! Venue-local geometry: points, vectors, and axis-aligned rectangles.
//!
//! All coordinates are meters in the venue frame. The z axis is height;
//! every distance used by detection and correlation is planar (x, y).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A 3D point or vector in venue-local meters (or meters/second for
/// velocities).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Vec3 {
    /// East-west axis.
    pub x: f64,
    /// North-south axis.
    pub y: f64,
    /// Height above the venue floor.
    #[serde(default)]
    pub z: f64,
}

impl Vec3 {
    /// The origin / zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a new point.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance between the (x, y) projections of two points.
    pub fn planar_distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Magnitude of the horizontal (x, y) component. Vertical motion is
    /// ignored.
    pub fn horizontal_norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Whether every component is a finite number.
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// An axis-aligned rectangle on the venue floor.
///
/// Containment is inclusive on all four edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Bounds {
    /// Western edge.
    pub x_min: f64,
    /// Southern edge.
    pub y_min: f64,
    /// Eastern edge.
    pub x_max: f64,
    /// Northern edge.
    pub y_max: f64,
}

impl Bounds {
    /// Create a rectangle from its corner coordinates.
    pub const fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Whether the (x, y) projection of `point` lies inside or on the edge
    /// of this rectangle.
    pub fn contains(&self, point: Vec3) -> bool {
        (self.x_min..=self.x_max).contains(&point.x) && (self.y_min..=self.y_max).contains(&point.y)
    }

    /// Midpoint of the rectangle at floor level.
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
            0.0,
        )
    }

    /// Extent along the x axis.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Extent along the y axis.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Whether every edge is a finite number.
    pub const fn is_finite(&self) -> bool {
        self.x_min.is_finite()
            && self.y_min.is_finite()
            && self.x_max.is_finite()
            && self.y_max.is_finite()
    }

    /// Smallest rectangle enclosing every point, or `None` for an empty
    /// input.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let seed = Self::new(first.x, first.y, first.x, first.y);
        Some(iter.fold(seed, |b, p| {
            Self::new(
                b.x_min.min(p.x),
                b.y_min.min(p.y),
                b.x_max.max(p.x),
                b.y_max.max(p.y),
            )
        }))
    }
}
