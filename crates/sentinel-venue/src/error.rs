//! Error types for the `sentinel-venue` crate.
//!
//! All fallible venue construction returns [`VenueError`]. The engine
//! never sees these: it only ever receives zones from a venue that was
//! built successfully.

use sentinel_types::ZoneError;

/// Errors that can occur while assembling a venue.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VenueError {
    /// The requested sport has no preset layout.
    #[error("unknown sport: {0}")]
    UnknownSport(String),

    /// A zone in the layout failed validation.
    #[error("invalid zone: {source}")]
    Zone {
        /// The underlying zone error.
        #[from]
        source: ZoneError,
    },

    /// Two zones share a name.
    #[error("duplicate zone name: {0}")]
    DuplicateZone(String),
}
