use crate::ephemeris::types::{HouseFrame, HouseSystem, PlanetPosition};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris unavailable: {message}")]
    Unavailable { message: String },
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Failed to calculate position for {planet_id} at JD {julian_day}: {message}")]
    CalculationFailed {
        planet_id: String,
        julian_day: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

impl EphemerisError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Source of planetary positions and house frames.
///
/// Implementations may block (file IO, native library calls). Callers that serve many
/// requests should bound these calls upstream; the chart engine never retries them.
pub trait EphemerisProvider {
    /// Positions of every body the provider tracks, in a stable order.
    fn positions_at(&self, julian_day: f64) -> Result<Vec<PlanetPosition>, EphemerisError>;

    /// Cusps and angles for a moment and place.
    fn houses_at(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError>;
}

impl<T: EphemerisProvider + ?Sized> EphemerisProvider for &T {
    fn positions_at(&self, julian_day: f64) -> Result<Vec<PlanetPosition>, EphemerisError> {
        (**self).positions_at(julian_day)
    }

    fn houses_at(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        (**self).houses_at(julian_day, latitude, longitude, system)
    }
}
