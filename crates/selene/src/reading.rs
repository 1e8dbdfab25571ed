use crate::ephemeris::CelestialBody;
use crate::zodiac::{sign_from_longitude, EclipticPosition};
use serde::{Deserialize, Serialize};

/// Which fallback policy produced a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackKind {
    /// Fixed Aries 0° placeholder
    Degenerate,
    /// Sun sign taken from the calendar table, degree is a placeholder
    SunCalendar,
    /// Position borrowed from the sky at the time of calculation
    CurrentSky,
}

/// One body placed on the wheel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyReading {
    pub body: CelestialBody,
    pub position: EclipticPosition,
    pub retrograde: bool,
    /// `None` when the provider answered for this body
    pub fallback: Option<FallbackKind>,
}

impl BodyReading {
    pub fn computed(body: CelestialBody, longitude: f64, retrograde: bool) -> Self {
        Self {
            body,
            position: sign_from_longitude(longitude),
            // never set for bodies that cannot appear to move backwards
            retrograde: retrograde && body.can_retrograde(),
            fallback: None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        self.body.symbol()
    }

    pub fn is_approximate(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Outcome of one per-body computation: either what the provider said or a
/// documented stand-in. Both carry a value, so a chart built from these is
/// complete by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
    Computed(T),
    Fallback { value: T, reason: String },
}

impl<T> Resolved<T> {
    pub fn into_value(self) -> T {
        match self {
            Resolved::Computed(value) | Resolved::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolved::Fallback { .. })
    }
}
