use crate::aspects::AspectKind;
use crate::ephemeris::EphemerisError;
use thiserror::Error;

/// Errors raised while assembling a chart or its aspects.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Invalid angle for {context}: {value} is not a finite number of degrees")]
    InvalidAngle { context: String, value: f64 },
    #[error("Invalid position for '{name}': {message}")]
    InvalidPosition { name: String, message: String },
    #[error("House resolution failed: {message}")]
    HouseResolution { message: String },
    #[error("Invalid orb table: {message}")]
    InvalidOrbTable {
        message: String,
        missing: Vec<AspectKind>,
    },
    #[error("Duplicate body '{name}' in position set")]
    DuplicateBody { name: String },
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

impl ChartError {
    pub(crate) fn house_resolution(message: impl Into<String>) -> Self {
        Self::HouseResolution {
            message: message.into(),
        }
    }
}
