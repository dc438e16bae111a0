use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{ChartAngles, HouseFrame, HouseSystem, PlanetPosition};
use crate::houses::HouseCusps;
use log::{debug, warn};
use std::env;
use std::path::PathBuf;
use swisseph::swe::{calc_ut, set_ephe_path};

// Swiss Ephemeris planet IDs: SUN=0 .. PLUTO=9, CHIRON=15
const PLANET_IDS: &[(&str, i32)] = &[
    ("Sun", 0),
    ("Moon", 1),
    ("Mercury", 2),
    ("Venus", 3),
    ("Mars", 4),
    ("Jupiter", 5),
    ("Saturn", 6),
    ("Uranus", 7),
    ("Neptune", 8),
    ("Pluto", 9),
    ("Chiron", 15),
];

// FLG_SWIEPH | FLG_SPEED
const CALC_FLAGS: i32 = 2 | 256;

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        let path_text = path.to_string_lossy();
        if path_text.contains('\0') {
            return Err(EphemerisError::FileNotFound {
                path: path_text.into_owned(),
                message: "Ephemeris path contains a NUL byte".to_string(),
            });
        }
        set_ephe_path(&path_text);
        debug!("swiss ephemeris data at {}", path.display());

        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn ephemeris_path(&self) -> &PathBuf {
        &self.ephemeris_path
    }

    /// Calculate position for a single planet
    fn calc_planet_position(
        &self,
        name: &str,
        code: i32,
        jd: f64,
    ) -> Result<PlanetPosition, EphemerisError> {
        let result = calc_ut(jd, code as u32, CALC_FLAGS as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                planet_id: name.to_string(),
                julian_day: jd,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        PlanetPosition::new(name, out[0], out[1], out[2], out[3]).map_err(|e| {
            EphemerisError::CalculationFailed {
                planet_id: name.to_string(),
                julian_day: jd,
                message: e.to_string(),
            }
        })
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn positions_at(&self, julian_day: f64) -> Result<Vec<PlanetPosition>, EphemerisError> {
        let mut planets = Vec::with_capacity(PLANET_IDS.len());
        for (name, code) in PLANET_IDS {
            match self.calc_planet_position(name, *code, julian_day) {
                Ok(position) => planets.push(position),
                // Chiron needs the asteroid file; a missing body is skipped
                Err(e) => warn!("skipping {}: {}", name, e),
            }
        }
        if planets.is_empty() {
            return Err(EphemerisError::unavailable(format!(
                "no bodies could be calculated for JD {}",
                julian_day
            )));
        }
        Ok(planets)
    }

    fn houses_at(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        use swisseph::swe::houses_ex;
        use swisseph::{AscMc, Cusp};

        let (c, a) = houses_ex(julian_day, 0, latitude, longitude, system.code() as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];

        let house_failed = |e: crate::error::ChartError| EphemerisError::HouseCalculationFailed {
            message: e.to_string(),
        };
        let cusps = HouseCusps::new(&cusp_values).map_err(house_failed)?;
        let angles = ChartAngles::new(ascmc.ascendant, ascmc.mc).map_err(house_failed)?;

        Ok(HouseFrame {
            system,
            cusps,
            angles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_rejected() {
        let missing = env::temp_dir().join("jovia-no-such-ephemeris-dir");
        assert!(matches!(
            SwissEphemerisAdapter::new(Some(missing)),
            Err(EphemerisError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_explicit_path_is_kept() {
        let dir = env::temp_dir();
        let adapter = SwissEphemerisAdapter::new(Some(dir.clone())).unwrap();
        assert_eq!(adapter.ephemeris_path(), &dir);
    }
}
