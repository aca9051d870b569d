//! Error types for the replay driver.
//!
//! [`EngineError`] wraps every failure mode of a replay run so `main` can
//! propagate with `?`.

/// Top-level error for the replay driver.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: sentinel_core::config::ConfigError,
    },

    /// The venue could not be built.
    #[error("venue error: {source}")]
    Venue {
        /// The underlying venue error.
        #[from]
        source: sentinel_venue::VenueError,
    },

    /// Reading ticks or writing envelopes failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// An envelope could not be serialized.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
