//! House cusps and house membership.

use crate::degrees::{checked_longitude, normalize_degrees};
use crate::error::ChartError;
use serde::{Deserialize, Serialize};

pub const HOUSE_COUNT: usize = 12;

/// Twelve house-cusp longitudes, index 0 being the 1st house (Ascendant-aligned).
///
/// Walking the cusps in order increases strictly modulo 360 with exactly one
/// wraparound through 0°, so no house is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct HouseCusps {
    cusps: [f64; HOUSE_COUNT],
}

impl HouseCusps {
    /// Validate and normalize raw cusp longitudes.
    pub fn new(raw: &[f64]) -> Result<Self, ChartError> {
        if raw.len() != HOUSE_COUNT {
            return Err(ChartError::house_resolution(format!(
                "expected {} cusps, got {}",
                HOUSE_COUNT,
                raw.len()
            )));
        }

        let mut cusps = [0.0; HOUSE_COUNT];
        for (i, value) in raw.iter().enumerate() {
            cusps[i] = checked_longitude(*value, &format!("cusp {}", i + 1))?;
        }

        if let Some(i) = (0..HOUSE_COUNT).find(|&i| cusps[(i + 1) % HOUSE_COUNT] == cusps[i]) {
            return Err(ChartError::house_resolution(format!(
                "cusps {} and {} coincide at {:.4}°; house {} would be empty",
                i + 1,
                (i + 1) % HOUSE_COUNT + 1,
                cusps[i],
                i + 1
            )));
        }

        let wraps = (0..HOUSE_COUNT)
            .filter(|&i| cusps[(i + 1) % HOUSE_COUNT] < cusps[i])
            .count();
        if wraps != 1 {
            return Err(ChartError::house_resolution(format!(
                "cusps must increase with exactly one wraparound through 0°, found {}",
                wraps
            )));
        }

        Ok(Self { cusps })
    }

    /// Equal 30° houses starting at the given Ascendant.
    pub fn equal_from(ascendant: f64) -> Result<Self, ChartError> {
        let asc = checked_longitude(ascendant, "ascendant")?;
        let raw: Vec<f64> = (0..HOUSE_COUNT)
            .map(|i| normalize_degrees(asc + 30.0 * i as f64))
            .collect();
        Self::new(&raw)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.cusps
    }

    /// Cusp longitude of a 1-based house.
    pub fn cusp(&self, house: u8) -> Option<f64> {
        match house {
            1..=12 => Some(self.cusps[house as usize - 1]),
            _ => None,
        }
    }

    /// House (1-12) containing a longitude.
    pub fn house_of(&self, longitude: f64) -> Result<u8, ChartError> {
        resolve_house(longitude, &self.cusps)
    }
}

impl TryFrom<Vec<f64>> for HouseCusps {
    type Error = ChartError;

    fn try_from(raw: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(&raw)
    }
}

impl From<HouseCusps> for Vec<f64> {
    fn from(cusps: HouseCusps) -> Self {
        cusps.cusps.to_vec()
    }
}

/// Resolve the house (1-12) for a longitude against raw cusps.
///
/// Segments are left-inclusive: a body exactly on a cusp belongs to the house that
/// begins there. A segment whose start is greater than its end crosses 0°.
pub fn resolve_house(longitude: f64, cusps: &[f64]) -> Result<u8, ChartError> {
    if cusps.len() < HOUSE_COUNT {
        return Err(ChartError::house_resolution(format!(
            "expected {} cusps, got {}",
            HOUSE_COUNT,
            cusps.len()
        )));
    }
    let lon = checked_longitude(longitude, "body longitude")?;

    for i in 0..HOUSE_COUNT {
        let start = normalize_degrees(cusps[i]);
        let end = normalize_degrees(cusps[(i + 1) % HOUSE_COUNT]);
        let inside = if start <= end {
            start <= lon && lon < end
        } else {
            lon >= start || lon < end
        };
        if inside {
            return Ok(i as u8 + 1);
        }
    }

    Err(ChartError::house_resolution(format!(
        "no house matched longitude {:.4}",
        lon
    )))
}
