//! Simplified equal-house wheel.
//!
//! Twelve 30° houses starting at 0° Aries. The wheel is not anchored to an
//! ascendant, so it is the same for every chart.

use crate::zodiac::{Sign, SIGN_WIDTH};
use serde::{Deserialize, Serialize};

pub const HOUSE_COUNT: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct House {
    /// 1..=12
    pub index: u8,
    pub sign: Sign,
    /// Cusp longitude
    pub degree: f64,
}

pub fn equal_houses() -> Vec<House> {
    (0..HOUSE_COUNT)
        .map(|i| House {
            index: (i + 1) as u8,
            sign: Sign::from_index(i),
            degree: i as f64 * SIGN_WIDTH,
        })
        .collect()
}

/// House (1..=12) containing a longitude on the equal wheel
pub fn house_for_longitude(longitude: f64) -> u8 {
    (crate::zodiac::sign_index(longitude) + 1) as u8
}
