use crate::degrees::{checked_finite, checked_longitude, normalize_degrees};
use crate::error::ChartError;
use crate::ephemeris::provider::EphemerisError;
use crate::houses::HouseCusps;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Planetary position data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlanetRecord")]
pub struct PlanetPosition {
    pub name: String,
    /// Longitude in degrees (0-360)
    #[serde(rename = "longitude")]
    pub lon: f64,
    /// Latitude in degrees
    #[serde(rename = "latitude")]
    pub lat: f64,
    /// Distance in AU
    pub distance: f64,
    /// Speed in longitude (degrees per day)
    #[serde(rename = "speed")]
    pub speed_lon: f64,
    /// Whether the planet is retrograde
    pub retrograde: bool,
}

impl PlanetPosition {
    /// Build a validated position. The longitude is normalized; retrograde follows the sign of
    /// the speed.
    pub fn new(
        name: impl Into<String>,
        lon: f64,
        lat: f64,
        distance: f64,
        speed_lon: f64,
    ) -> Result<Self, ChartError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ChartError::InvalidPosition {
                name: name.clone(),
                message: "body name is empty".to_string(),
            });
        }
        let name = trimmed.to_string();
        Ok(Self {
            lon: checked_longitude(lon, &format!("{} longitude", name))?,
            lat: checked_finite(lat, &format!("{} latitude", name))?,
            distance: checked_finite(distance, &format!("{} distance", name))?,
            speed_lon: checked_finite(speed_lon, &format!("{} speed", name))?,
            retrograde: speed_lon < 0.0,
            name,
        })
    }

    /// A stationary body on the ecliptic at the given longitude.
    pub fn at(name: impl Into<String>, lon: f64) -> Result<Self, ChartError> {
        Self::new(name, lon, 0.0, 0.0, 0.0)
    }
}

/// Wire shape accepted for planet positions.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanetRecord {
    name: String,
    longitude: f64,
    #[serde(default)]
    latitude: f64,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    retrograde: Option<bool>,
}

impl TryFrom<PlanetRecord> for PlanetPosition {
    type Error = ChartError;

    fn try_from(record: PlanetRecord) -> Result<Self, Self::Error> {
        let position = PlanetPosition::new(
            record.name,
            record.longitude,
            record.latitude,
            record.distance,
            record.speed,
        )?;
        if let Some(flag) = record.retrograde {
            if flag != position.retrograde {
                return Err(ChartError::InvalidPosition {
                    name: position.name,
                    message: format!(
                        "retrograde flag {} contradicts speed {}",
                        flag, position.speed_lon
                    ),
                });
            }
        }
        Ok(position)
    }
}

/// Ascendant and Midheaven of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartAngles {
    pub ascendant: f64,
    pub midheaven: f64,
}

impl ChartAngles {
    pub fn new(ascendant: f64, midheaven: f64) -> Result<Self, ChartError> {
        Ok(Self {
            ascendant: checked_longitude(ascendant, "ascendant")?,
            midheaven: checked_longitude(midheaven, "midheaven")?,
        })
    }

    pub fn descendant(&self) -> f64 {
        normalize_degrees(self.ascendant + 180.0)
    }

    pub fn imum_coeli(&self) -> f64 {
        normalize_degrees(self.midheaven + 180.0)
    }
}

/// House cusps and angles for one chart moment and place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseFrame {
    pub system: HouseSystem,
    pub cusps: HouseCusps,
    pub angles: ChartAngles,
}

/// House system mapping
const HOUSE_SYSTEMS: &[(&str, HouseSystem, u8)] = &[
    ("placidus", HouseSystem::Placidus, b'P'),
    ("whole_sign", HouseSystem::WholeSign, b'W'),
    ("koch", HouseSystem::Koch, b'K'),
    ("equal", HouseSystem::Equal, b'E'),
    ("regiomontanus", HouseSystem::Regiomontanus, b'R'),
    ("campanus", HouseSystem::Campanus, b'C'),
    ("alcabitius", HouseSystem::Alcabitius, b'A'),
    ("morinus", HouseSystem::Morinus, b'M'),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    WholeSign,
    Koch,
    Equal,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
}

impl HouseSystem {
    pub fn name(self) -> &'static str {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, system, _)| *system == self)
            .map(|(name, _, _)| *name)
            .unwrap_or("placidus")
    }

    /// Single-letter code used by the Swiss Ephemeris house routines.
    pub fn code(self) -> u8 {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, system, _)| *system == self)
            .map(|(_, _, code)| *code)
            .unwrap_or(b'P')
    }
}

impl FromStr for HouseSystem {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        HOUSE_SYSTEMS
            .iter()
            .find(|(name, _, _)| *name == wanted)
            .map(|(_, system, _)| *system)
            .ok_or_else(|| EphemerisError::InvalidHouseSystem {
                system: s.to_string(),
                valid: HOUSE_SYSTEMS.iter().map(|(name, _, _)| name.to_string()).collect(),
            })
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planet_position_validation() {
        let p = PlanetPosition::new("Mars", -10.0, 1.2, 1.5, -0.3).unwrap();
        assert_eq!(p.lon, 350.0);
        assert!(p.retrograde);
        assert!(PlanetPosition::new("Mars", f64::NAN, 0.0, 0.0, 0.0).is_err());
        assert!(matches!(
            PlanetPosition::new("  ", 10.0, 0.0, 0.0, 0.0),
            Err(ChartError::InvalidPosition { .. })
        ));
    }

    #[test]
    fn test_planet_record_strict() {
        let ok: PlanetPosition =
            serde_json::from_str(r#"{"name":"Sun","longitude":370.5,"speed":0.98}"#).unwrap();
        assert_eq!(ok.lon, 10.5);
        assert!(!ok.retrograde);

        let unknown = serde_json::from_str::<PlanetPosition>(
            r#"{"name":"Sun","lon":10.0}"#,
        );
        assert!(unknown.is_err());

        let contradictory = serde_json::from_str::<PlanetPosition>(
            r#"{"name":"Sun","longitude":10.0,"speed":1.0,"retrograde":true}"#,
        );
        let message = contradictory.unwrap_err().to_string();
        assert!(message.contains("contradicts speed"), "{message}");
        assert!(!message.contains("finite"), "{message}");
    }

    #[test]
    fn test_serialized_position_reads_back() {
        let p = PlanetPosition::new("Saturn", 100.0, 0.5, 9.8, -0.02).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: PlanetPosition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_house_system_parse() {
        assert_eq!("Placidus".parse::<HouseSystem>().unwrap(), HouseSystem::Placidus);
        assert_eq!("whole-sign".parse::<HouseSystem>().unwrap(), HouseSystem::WholeSign);
        assert_eq!(HouseSystem::Koch.code(), b'K');
        assert!(matches!(
            "topocentric".parse::<HouseSystem>(),
            Err(EphemerisError::InvalidHouseSystem { .. })
        ));
    }

    #[test]
    fn test_derived_angles() {
        let angles = ChartAngles::new(200.0, 110.0).unwrap();
        assert_eq!(angles.descendant(), 20.0);
        assert_eq!(angles.imum_coeli(), 290.0);
    }
}
