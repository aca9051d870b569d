//! Configuration loading and typed config structures for Venue Sentinel.
//!
//! The canonical configuration lives in `sentinel-config.yaml` in the
//! working directory. Every field has a serde default, so a missing or
//! empty file yields the default engine.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SentinelConfig {
    /// Venue selection for the replay driver.
    #[serde(default)]
    pub venue: VenueConfig,

    /// Detection throttling knobs.
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Baseline estimator selection.
    #[serde(default)]
    pub baseline: BaselineConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SentinelConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.detection;
        if !(d.anomaly_rate_per_minute >= 0.0 && d.anomaly_rate_per_minute.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "detection.anomaly_rate_per_minute",
                reason: format!("must be >= 0, got {}", d.anomaly_rate_per_minute),
            });
        }
        if !(d.min_anomaly_interval_secs >= 0.0 && d.min_anomaly_interval_secs.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "detection.min_anomaly_interval_secs",
                reason: format!("must be >= 0, got {}", d.min_anomaly_interval_secs),
            });
        }
        let b = &self.baseline;
        if !(b.seed_density > 0.0 && b.seed_density.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "baseline.seed_density",
                reason: format!("must be > 0, got {}", b.seed_density),
            });
        }
        if !(b.ema_alpha > 0.0 && b.ema_alpha <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "baseline.ema_alpha",
                reason: format!("must be in (0, 1], got {}", b.ema_alpha),
            });
        }
        Ok(())
    }
}

/// Venue selection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VenueConfig {
    /// Sport preset name (`BASKETBALL`, `SOCCER`, `COMBAT`).
    #[serde(default = "default_sport")]
    pub sport: String,

    /// Session identifier copied into published envelopes.
    #[serde(default)]
    pub session_id: Option<String>,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            sport: default_sport(),
            session_id: None,
        }
    }
}

/// Throttling knobs declared for the detection layer.
///
/// These are parsed, validated and exposed on the engine, but no detector
/// or the correlation pass reads them: every qualifying anomaly is emitted
/// on every tick.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectionConfig {
    /// Target anomaly rate, per minute.
    #[serde(default = "default_anomaly_rate_per_minute")]
    pub anomaly_rate_per_minute: f64,

    /// Minimum seconds between consecutive anomalies.
    #[serde(default = "default_min_anomaly_interval_secs")]
    pub min_anomaly_interval_secs: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            anomaly_rate_per_minute: default_anomaly_rate_per_minute(),
            min_anomaly_interval_secs: default_min_anomaly_interval_secs(),
        }
    }
}

/// Which baseline estimator backs crowd-compression detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselineMode {
    /// Seeded once per zone, never updated.
    #[default]
    Static,
    /// Seeded once per zone, then blended toward observed density.
    Ema,
}

/// Baseline estimator configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BaselineConfig {
    /// Estimator selection.
    #[serde(default)]
    pub mode: BaselineMode,

    /// Density (entities/m²) assigned to a zone on first sight.
    #[serde(default = "default_seed_density")]
    pub seed_density: f64,

    /// Blend weight of each new observation (EMA mode only).
    #[serde(default = "default_ema_alpha")]
    pub ema_alpha: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            mode: BaselineMode::Static,
            seed_density: default_seed_density(),
            ema_alpha: default_ema_alpha(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_sport() -> String {
    "BASKETBALL".to_owned()
}

const fn default_anomaly_rate_per_minute() -> f64 {
    2.0
}

const fn default_min_anomaly_interval_secs() -> f64 {
    5.0
}

const fn default_seed_density() -> f64 {
    1.0
}

const fn default_ema_alpha() -> f64 {
    0.1
}

fn default_log_level() -> String {
    "info".to_owned()
}
