//! Recorded ephemeris output.
//!
//! A snapshot holds the positions and houses one provider produced for a single moment and
//! place. It answers only for that moment and place, which makes charts reproducible offline
//! and in tests.

use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{GeoLocation, HouseFrame, HouseSystem, PlanetPosition};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const MATCH_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SnapshotEphemeris {
    pub julian_day: f64,
    pub location: GeoLocation,
    pub planets: Vec<PlanetPosition>,
    pub houses: HouseFrame,
}

impl SnapshotEphemeris {
    /// Record what a live provider reports for one moment and place.
    pub fn capture<P: EphemerisProvider + ?Sized>(
        provider: &P,
        julian_day: f64,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<Self, EphemerisError> {
        let planets = provider.positions_at(julian_day)?;
        let houses = provider.houses_at(julian_day, location.lat, location.lon, system)?;
        Ok(Self {
            julian_day,
            location,
            planets,
            houses,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, EphemerisError> {
        serde_json::from_str(text).map_err(|e| EphemerisError::Unavailable {
            message: format!("invalid snapshot: {}", e),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, EphemerisError> {
        let text = fs::read_to_string(path).map_err(|e| EphemerisError::FileNotFound {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn house_system(&self) -> HouseSystem {
        self.houses.system
    }

    fn check_moment(&self, julian_day: f64) -> Result<(), EphemerisError> {
        if (julian_day - self.julian_day).abs() > MATCH_TOLERANCE {
            return Err(EphemerisError::unavailable(format!(
                "snapshot recorded for JD {}, requested JD {}",
                self.julian_day, julian_day
            )));
        }
        Ok(())
    }
}

impl EphemerisProvider for SnapshotEphemeris {
    fn positions_at(&self, julian_day: f64) -> Result<Vec<PlanetPosition>, EphemerisError> {
        self.check_moment(julian_day)?;
        Ok(self.planets.clone())
    }

    fn houses_at(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        self.check_moment(julian_day)?;
        if (latitude - self.location.lat).abs() > MATCH_TOLERANCE
            || (longitude - self.location.lon).abs() > MATCH_TOLERANCE
        {
            return Err(EphemerisError::unavailable(format!(
                "snapshot recorded at ({}, {}), requested ({}, {})",
                self.location.lat, self.location.lon, latitude, longitude
            )));
        }
        if system != self.houses.system {
            return Err(EphemerisError::unavailable(format!(
                "snapshot recorded with {} houses, requested {}",
                self.houses.system, system
            )));
        }
        Ok(self.houses.clone())
    }
}
