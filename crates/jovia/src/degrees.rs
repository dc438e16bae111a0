//! Angle normalisation and sign/degree/minute conversion.

use crate::error::ChartError;
use crate::zodiac::ZodiacSign;
use serde::{Deserialize, Serialize};

/// Normalize degrees to [0, 360).
///
/// Values already in range are returned untouched, so normalizing twice is a no-op. A tiny
/// negative input that rounds up to 360.0 is folded to 0.0.
pub fn normalize_degrees(angle: f64) -> f64 {
    let rem = angle % 360.0;
    let shifted = if rem < 0.0 { rem + 360.0 } else { rem };
    if shifted >= 360.0 {
        0.0
    } else {
        shifted
    }
}

/// Reject NaN/infinite input, then normalize.
pub fn checked_longitude(value: f64, context: &str) -> Result<f64, ChartError> {
    if !value.is_finite() {
        return Err(ChartError::InvalidAngle {
            context: context.to_string(),
            value,
        });
    }
    Ok(normalize_degrees(value))
}

/// Reject NaN/infinite input without normalizing (latitudes, speeds, distances).
pub fn checked_finite(value: f64, context: &str) -> Result<f64, ChartError> {
    if !value.is_finite() {
        return Err(ChartError::InvalidAngle {
            context: context.to_string(),
            value,
        });
    }
    Ok(value)
}

/// Shortest arc between two longitudes, in [0, 180].
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let diff = (lon1 - lon2).abs() % 360.0;
    diff.min(360.0 - diff)
}

/// A longitude expressed as sign, whole degree in sign and arc minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignPosition {
    pub sign: ZodiacSign,
    pub degree: u8,
    pub minute: u8,
}

impl SignPosition {
    /// Split a longitude into sign, degree and rounded minute.
    ///
    /// Rounding up to 60' carries into the degree, and 30° carries into the next sign.
    pub fn from_longitude(longitude: f64) -> Self {
        let lon = normalize_degrees(longitude);
        let mut sign_index = (lon / 30.0).floor() as usize % 12;
        let in_sign = lon - sign_index as f64 * 30.0;
        let mut degree = in_sign.floor() as u32;
        let mut minute = ((in_sign - degree as f64) * 60.0).round() as u32;

        if minute >= 60 {
            minute = 0;
            degree += 1;
        }
        if degree >= 30 {
            degree = 0;
            sign_index = (sign_index + 1) % 12;
        }

        Self {
            sign: ZodiacSign::from_index(sign_index),
            degree: degree as u8,
            minute: minute as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_range_and_idempotence() {
        for x in [-720.5, -360.0, -1e-14, -0.25, 0.0, 59.9, 359.999, 360.0, 725.0, 1e9] {
            let n = normalize_degrees(x);
            assert!((0.0..360.0).contains(&n), "{} -> {}", x, n);
            assert_eq!(normalize_degrees(n), n);
        }
        assert_eq!(normalize_degrees(-30.0), 330.0);
        assert_eq!(normalize_degrees(390.0), 30.0);
    }

    #[test]
    fn test_checked_longitude_rejects_nan() {
        assert!(matches!(
            checked_longitude(f64::NAN, "sun"),
            Err(ChartError::InvalidAngle { .. })
        ));
        assert!(checked_longitude(f64::INFINITY, "sun").is_err());
        assert_eq!(checked_longitude(-90.0, "sun").unwrap(), 270.0);
    }

    #[test]
    fn test_angular_separation() {
        assert_eq!(angular_separation(10.0, 100.0), 90.0);
        assert_eq!(angular_separation(0.0, 182.0), 178.0);
        assert_eq!(angular_separation(350.0, 10.0), 20.0);
        assert_eq!(angular_separation(100.0, 100.0), 0.0);
    }

    #[test]
    fn test_sign_position_basic() {
        let pos = SignPosition::from_longitude(45.5);
        assert_eq!(pos.sign, ZodiacSign::Taurus);
        assert_eq!(pos.degree, 15);
        assert_eq!(pos.minute, 30);
    }

    #[test]
    fn test_sign_position_minute_carry() {
        // 29°59.7' Aries rounds to 0°00' Taurus
        let pos = SignPosition::from_longitude(29.0 + 59.7 / 60.0);
        assert_eq!(pos.sign, ZodiacSign::Taurus);
        assert_eq!(pos.degree, 0);
        assert_eq!(pos.minute, 0);

        // 12°59.8' Leo carries into the degree only
        let pos = SignPosition::from_longitude(120.0 + 12.0 + 59.8 / 60.0);
        assert_eq!(pos.sign, ZodiacSign::Leo);
        assert_eq!(pos.degree, 13);
        assert_eq!(pos.minute, 0);
    }

    #[test]
    fn test_sign_position_wraps_pisces() {
        let pos = SignPosition::from_longitude(359.0 + 59.9 / 60.0);
        assert_eq!(pos.sign, ZodiacSign::Aries);
        assert_eq!(pos.degree, 0);
        assert_eq!(pos.minute, 0);
    }
}
