//! A venue: the static zone list a monitoring session runs against.

use std::collections::BTreeSet;

use sentinel_types::Zone;
use tracing::debug;

use crate::error::VenueError;
use crate::layout;
use crate::sport::Sport;

/// A venue with a validated, uniquely named zone list.
#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    sport: Option<Sport>,
    zones: Vec<Zone>,
}

impl Venue {
    /// Build the preset venue for `sport`.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::Zone`] if a preset zone is invalid.
    pub fn for_sport(sport: Sport) -> Result<Self, VenueError> {
        let zones = layout::zones_for(sport)?;
        debug!(sport = %sport, zone_count = zones.len(), "preset venue built");
        Self::assemble(Some(sport), zones)
    }

    /// Build the preset venue for a sport given by name.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::UnknownSport`] if the name is not recognized.
    pub fn for_sport_name(name: &str) -> Result<Self, VenueError> {
        Self::for_sport(name.parse()?)
    }

    /// Build a venue from an explicit zone list.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::DuplicateZone`] if two zones share a name.
    pub fn custom(zones: Vec<Zone>) -> Result<Self, VenueError> {
        Self::assemble(None, zones)
    }

    fn assemble(sport: Option<Sport>, zones: Vec<Zone>) -> Result<Self, VenueError> {
        let mut seen = BTreeSet::new();
        for zone in &zones {
            if !seen.insert(zone.name()) {
                return Err(VenueError::DuplicateZone(zone.name().to_owned()));
            }
        }
        Ok(Self { sport, zones })
    }

    /// The preset sport, if this venue was built from one.
    pub const fn sport(&self) -> Option<Sport> {
        self.sport
    }

    /// All zones, in layout order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Zones only players may enter.
    pub fn restricted_zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter().filter(|z| z.is_restricted())
    }

    /// Consume the venue, yielding its zones.
    pub fn into_zones(self) -> Vec<Zone> {
        self.zones
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sentinel_types::{Bounds, ZoneKind};

    use super::*;

    #[test]
    fn preset_by_name() {
        let venue = Venue::for_sport_name("soccer").unwrap();
        assert_eq!(venue.sport(), Some(Sport::Soccer));
        assert_eq!(venue.zones().len(), 3);
        assert_eq!(venue.restricted_zones().count(), 2);
        assert!(venue.zones().iter().any(|z| z.name() == "FIELD"));
        assert!(!venue.zones().iter().any(|z| z.name() == "COURT"));
    }

    #[test]
    fn unknown_sport_name_fails() {
        assert!(matches!(
            Venue::for_sport_name("QUIDDITCH"),
            Err(VenueError::UnknownSport(_))
        ));
    }

    #[test]
    fn custom_venue_rejects_duplicate_names() {
        let a = Zone::new("GATE", Bounds::new(0.0, 0.0, 1.0, 1.0), 1.0, ZoneKind::Other).unwrap();
        let b = a.clone();
        assert_eq!(
            Venue::custom(vec![a, b]),
            Err(VenueError::DuplicateZone("GATE".to_owned()))
        );
    }

    #[test]
    fn custom_venue_from_json_zones() {
        let json = r#"[
            {"name":"CONCOURSE","bounds":{"xMin":0,"yMin":0,"xMax":20,"yMax":5},"area":100,"kind":"OTHER"},
            {"name":"VIP","bounds":{"xMin":20,"yMin":0,"xMax":25,"yMax":5},"area":25,"kind":"RESTRICTED"}
        ]"#;
        let zones: Vec<Zone> = serde_json::from_str(json).unwrap();
        let venue = Venue::custom(zones).unwrap();
        assert!(venue.sport().is_none());
        assert_eq!(venue.restricted_zones().count(), 1);
    }
}
