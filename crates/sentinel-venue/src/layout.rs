//! Preset zone layouts for each supported sport.
//!
//! Dimensions are regulation sizes in meters with the origin at one
//! corner of the playing surface. Areas are stated explicitly rather than
//! derived from the bounds, because some zones approximate irregular
//! shapes (the paint, the penalty box).

use sentinel_types::{Bounds, Zone, ZoneError, ZoneKind};

use crate::sport::Sport;

/// NBA court length.
pub const COURT_LENGTH: f64 = 28.65;
/// NBA court width.
pub const COURT_WIDTH: f64 = 15.24;
/// Soccer pitch length.
pub const PITCH_LENGTH: f64 = 105.0;
/// Soccer pitch width.
pub const PITCH_WIDTH: f64 = 68.0;
/// Combat ring side length.
pub const RING_SIZE: f64 = 9.0;

/// Build the zone list for `sport`.
///
/// # Errors
///
/// Returns [`ZoneError`] if a preset zone fails validation.
pub fn zones_for(sport: Sport) -> Result<Vec<Zone>, ZoneError> {
    match sport {
        Sport::Basketball => basketball(),
        Sport::Soccer => soccer(),
        Sport::Combat => combat(),
    }
}

fn basketball() -> Result<Vec<Zone>, ZoneError> {
    let mid = COURT_WIDTH / 2.0;
    Ok(vec![
        Zone::new(
            "COURT",
            Bounds::new(0.0, 0.0, COURT_LENGTH, COURT_WIDTH),
            COURT_LENGTH * COURT_WIDTH,
            ZoneKind::Field,
        )?,
        Zone::new(
            "HOME_BENCH",
            Bounds::new(0.0, 0.0, 5.0, 2.0),
            10.0,
            ZoneKind::Bench,
        )?,
        Zone::new(
            "AWAY_BENCH",
            Bounds::new(0.0, COURT_WIDTH - 2.0, 5.0, COURT_WIDTH),
            10.0,
            ZoneKind::Bench,
        )?,
        Zone::new(
            "PAINT_HOME",
            Bounds::new(0.0, mid - 2.44, 5.8, mid + 2.44),
            28.3,
            ZoneKind::Restricted,
        )?,
    ])
}

fn soccer() -> Result<Vec<Zone>, ZoneError> {
    let mid = PITCH_WIDTH / 2.0;
    Ok(vec![
        Zone::new(
            "FIELD",
            Bounds::new(0.0, 0.0, PITCH_LENGTH, PITCH_WIDTH),
            PITCH_LENGTH * PITCH_WIDTH,
            ZoneKind::Field,
        )?,
        Zone::new(
            "PENALTY_AREA_HOME",
            Bounds::new(0.0, mid - 20.15, 16.5, mid + 20.15),
            665.0,
            ZoneKind::Restricted,
        )?,
        Zone::new(
            "PENALTY_AREA_AWAY",
            Bounds::new(PITCH_LENGTH - 16.5, mid - 20.15, PITCH_LENGTH, mid + 20.15),
            665.0,
            ZoneKind::Restricted,
        )?,
    ])
}

fn combat() -> Result<Vec<Zone>, ZoneError> {
    Ok(vec![
        Zone::new(
            "RING",
            Bounds::new(0.0, 0.0, RING_SIZE, RING_SIZE),
            81.0,
            ZoneKind::Ring,
        )?,
        Zone::new(
            "RINGSIDE",
            Bounds::new(-2.0, -2.0, RING_SIZE + 2.0, RING_SIZE + 2.0),
            150.0,
            ZoneKind::Restricted,
        )?,
    ])
}
