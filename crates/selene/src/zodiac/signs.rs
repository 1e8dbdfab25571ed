//! Zodiac signs and the longitude-to-sign mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of one sign on the ecliptic, in degrees
pub const SIGN_WIDTH: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
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

const SIGNS: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

const SIGN_KEYS: [&str; 12] = [
    "aries", "taurus", "gemini", "cancer", "leo", "virgo",
    "libra", "scorpio", "sagittarius", "capricorn", "aquarius", "pisces",
];

const SIGN_NAMES: [&str; 12] = [
    "Aries", "Taurus", "Gemini", "Cancer", "Leo", "Virgo",
    "Libra", "Scorpio", "Sagittarius", "Capricorn", "Aquarius", "Pisces",
];

impl Sign {
    pub const ALL: [Sign; 12] = SIGNS;

    /// Sign at position `index` counted from Aries, wrapping every 12
    pub fn from_index(index: usize) -> Self {
        SIGNS[index % 12]
    }

    /// 0 for Aries through 11 for Pisces
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase key ("sagittarius")
    pub fn key(self) -> &'static str {
        SIGN_KEYS[self.index()]
    }

    /// Display name ("Sagittarius")
    pub fn name(self) -> &'static str {
        SIGN_NAMES[self.index()]
    }

    /// Longitude where this sign begins
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * SIGN_WIDTH
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A longitude placed on the zodiac wheel.
///
/// Always built through [`sign_from_longitude`] so that the longitude is in
/// `[0, 360)`, the sign matches `floor(longitude / 30)` and the degree is the
/// remainder within that sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticPosition {
    pub longitude: f64,
    pub sign: Sign,
    pub degree: f64,
}

impl EclipticPosition {
    /// Position at a fixed degree inside a sign. Used when only the sign is
    /// known and the degree is a placeholder.
    pub fn within_sign(sign: Sign, degree: f64) -> Self {
        sign_from_longitude(sign.start_longitude() + degree.rem_euclid(SIGN_WIDTH))
    }
}

/// Fold any real longitude into `[0, 360)`.
///
/// Non-finite input has no meaningful direction and maps to 0.
pub fn normalize(lon: f64) -> f64 {
    if !lon.is_finite() {
        return 0.0;
    }
    // Same as ((lon % 360) + 360) % 360, without the rounding of the add
    let folded = lon.rem_euclid(360.0);
    // Tiny negative inputs can round up to exactly 360
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}

pub fn sign_index(lon: f64) -> usize {
    ((normalize(lon) / SIGN_WIDTH).floor() as usize).min(11)
}

pub fn sign_from_longitude(lon: f64) -> EclipticPosition {
    let longitude = normalize(lon);
    let index = sign_index(longitude);
    let degree = longitude % SIGN_WIDTH;
    EclipticPosition {
        longitude,
        sign: Sign::from_index(index),
        degree,
    }
}
