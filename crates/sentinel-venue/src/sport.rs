//! Supported sports.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VenueError;

/// A sport with a preset venue layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sport {
    /// Indoor court, NBA dimensions.
    Basketball,
    /// Outdoor pitch, 105 m x 68 m.
    Soccer,
    /// Ring sports (boxing, MMA).
    Combat,
}

impl Sport {
    /// Wire name of the sport.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basketball => "BASKETBALL",
            Self::Soccer => "SOCCER",
            Self::Combat => "COMBAT",
        }
    }
}

impl core::fmt::Display for Sport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sport {
    type Err = VenueError;

    /// Case-insensitive parse of the wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BASKETBALL" => Ok(Self::Basketball),
            "SOCCER" => Ok(Self::Soccer),
            "COMBAT" => Ok(Self::Combat),
            _ => Err(VenueError::UnknownSport(s.to_owned())),
        }
    }
}
