//! Zodiac signs.
//!
//! Tropical signs in zodiac order, with the English and Turkish names used in chart output.

use crate::degrees::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

const SIGN_ORDER: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

const SIGN_NAMES: [&str; 12] = [
    "Aries", "Taurus", "Gemini", "Cancer",
    "Leo", "Virgo", "Libra", "Scorpio",
    "Sagittarius", "Capricorn", "Aquarius", "Pisces",
];

const SIGN_NAMES_TR: [&str; 12] = [
    "Koç", "Boğa", "İkizler", "Yengeç",
    "Aslan", "Başak", "Terazi", "Akrep",
    "Yay", "Oğlak", "Kova", "Balık",
];

impl ZodiacSign {
    /// Sign for an index; wraps modulo 12.
    pub fn from_index(index: usize) -> Self {
        SIGN_ORDER[index % 12]
    }

    /// Sign containing an absolute longitude.
    pub fn from_longitude(longitude: f64) -> Self {
        let lon = normalize_degrees(longitude);
        Self::from_index((lon / 30.0) as usize)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        SIGN_NAMES[self.index()]
    }

    pub fn turkish_name(self) -> &'static str {
        SIGN_NAMES_TR[self.index()]
    }

    /// The sign 180° away.
    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 6)
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_longitude() {
        assert_eq!(ZodiacSign::from_longitude(0.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(29.999), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(30.0), ZodiacSign::Taurus);
        assert_eq!(ZodiacSign::from_longitude(359.5), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::from_longitude(-10.0), ZodiacSign::Pisces);
    }

    #[test]
    fn test_names() {
        assert_eq!(ZodiacSign::Gemini.turkish_name(), "İkizler");
        assert_eq!(ZodiacSign::Sagittarius.turkish_name(), "Yay");
        assert_eq!(ZodiacSign::Capricorn.to_string(), "Capricorn");
    }

    #[test]
    fn test_opposite() {
        assert_eq!(ZodiacSign::Sagittarius.opposite(), ZodiacSign::Gemini);
        assert_eq!(ZodiacSign::Aries.opposite(), ZodiacSign::Libra);
    }
}
