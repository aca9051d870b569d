//! Venue construction for the Venue Sentinel anomaly engine.
//!
//! A venue is the static zone list a monitoring session runs against.
//! Preset layouts exist for each supported [`Sport`]; custom layouts can be
//! supplied as explicit zone lists. Construction problems (unknown sport,
//! bad zone geometry, duplicate names) surface here as [`VenueError`], so
//! the engine only ever receives valid zones.
//!
//! # Modules
//!
//! - [`error`] -- Error types for venue construction.
//! - [`layout`] -- Regulation zone layouts per sport.
//! - [`sport`] -- The [`Sport`] enumeration and its parser.
//! - [`venue`] -- The [`Venue`] container.

pub mod error;
pub mod layout;
pub mod sport;
pub mod venue;

// Re-export primary types at crate root.
pub use error::VenueError;
pub use sport::Sport;
pub use venue::Venue;
