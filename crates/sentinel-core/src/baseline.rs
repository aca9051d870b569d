//! Per-zone density baselines.
//!
//! A baseline is the "normal" density of a zone in entities per square
//! meter, the reference point for crowd-compression detection. Lookups are
//! always by zone name and always return a value, so detectors never see a
//! missing baseline.
//!
//! Two estimators implement [`BaselineTracker`]:
//!
//! - [`StaticBaselines`] seeds each newly seen zone once and never changes
//!   it afterwards. This is the default.
//! - [`EmaBaselines`] seeds identically, then blends each tick's observed
//!   density into the baseline with a fixed weight.

use std::collections::BTreeMap;

use sentinel_types::{Entity, Zone};
use tracing::trace;

use crate::config::{BaselineConfig, BaselineMode};

/// Density assigned to a zone on first sight.
pub const DEFAULT_SEED_DENSITY: f64 = 1.0;

/// Density reported for a zone that has never been seeded.
pub const FALLBACK_DENSITY: f64 = 0.5;

/// A per-zone baseline estimator.
///
/// [`update`] runs once per tick before any detector; [`density`] is then
/// queried by the crowd-compression detector.
///
/// [`update`]: BaselineTracker::update
/// [`density`]: BaselineTracker::density
pub trait BaselineTracker: core::fmt::Debug + Send {
    /// Fold this tick's snapshot into the baselines.
    fn update(&mut self, entities: &[&Entity], zones: &[Zone]);

    /// Expected density for `zone`, or [`FALLBACK_DENSITY`] if unknown.
    fn density(&self, zone: &str) -> f64;
}

/// Build the estimator selected by `config`.
pub fn from_config(config: &BaselineConfig) -> Box<dyn BaselineTracker> {
    match config.mode {
        BaselineMode::Static => Box::new(StaticBaselines::with_seed(config.seed_density)),
        BaselineMode::Ema => Box::new(EmaBaselines::new(config.seed_density, config.ema_alpha)),
    }
}

/// Observed density of `zone`: entities inside its rectangle per square
/// meter of its declared area.
pub fn observed_density(entities: &[&Entity], zone: &Zone) -> f64 {
    let inside = entities
        .iter()
        .filter(|e| zone.contains(e.position))
        .count();
    #[allow(clippy::cast_precision_loss)]
    let inside = inside as f64;
    inside / zone.area()
}

/// Seed-once baselines.
#[derive(Debug, Clone)]
pub struct StaticBaselines {
    seed: f64,
    densities: BTreeMap<String, f64>,
}

impl StaticBaselines {
    /// Baselines seeded at [`DEFAULT_SEED_DENSITY`].
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED_DENSITY)
    }

    /// Baselines seeded at `seed`.
    pub const fn with_seed(seed: f64) -> Self {
        Self {
            seed,
            densities: BTreeMap::new(),
        }
    }
}

impl Default for StaticBaselines {
    fn default() -> Self {
        Self::new()
    }
}

impl BaselineTracker for StaticBaselines {
    fn update(&mut self, _entities: &[&Entity], zones: &[Zone]) {
        for zone in zones {
            if !self.densities.contains_key(zone.name()) {
                trace!(zone = zone.name(), seed = self.seed, "seeding baseline");
                self.densities.insert(zone.name().to_owned(), self.seed);
            }
        }
    }

    fn density(&self, zone: &str) -> f64 {
        self.densities.get(zone).copied().unwrap_or(FALLBACK_DENSITY)
    }
}

/// Exponential-moving-average baselines.
///
/// The first sighting of a zone seeds it exactly like [`StaticBaselines`];
/// every later update moves the baseline `alpha` of the way toward the
/// observed density.
#[derive(Debug, Clone)]
pub struct EmaBaselines {
    seed: f64,
    alpha: f64,
    densities: BTreeMap<String, f64>,
}

impl EmaBaselines {
    /// Create an estimator with the given seed and blend weight.
    pub const fn new(seed: f64, alpha: f64) -> Self {
        Self {
            seed,
            alpha,
            densities: BTreeMap::new(),
        }
    }
}

impl BaselineTracker for EmaBaselines {
    fn update(&mut self, entities: &[&Entity], zones: &[Zone]) {
        for zone in zones {
            match self.densities.get_mut(zone.name()) {
                Some(baseline) => {
                    let observed = observed_density(entities, zone);
                    *baseline = self.alpha.mul_add(observed - *baseline, *baseline);
                }
                None => {
                    self.densities.insert(zone.name().to_owned(), self.seed);
                }
            }
        }
    }

    fn density(&self, zone: &str) -> f64 {
        self.densities.get(zone).copied().unwrap_or(FALLBACK_DENSITY)
    }
}
