#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use selene::ephemeris::{CelestialBody, Ephemeris, EphemerisError, IlluminationReading, PhaseReading};
use std::collections::{HashMap, HashSet};

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// Provider with scripted linear motion and injectable failures.
///
/// Longitude = base + daily motion × days since 2000-01-01.
pub struct ScriptedEphemeris {
    pub base: HashMap<CelestialBody, f64>,
    pub daily_motion: HashMap<CelestialBody, f64>,
    pub failing: HashSet<CelestialBody>,
    pub illumination: Option<IlluminationReading>,
    pub phase: Option<PhaseReading>,
}

impl ScriptedEphemeris {
    pub fn new() -> Self {
        let mut base = HashMap::new();
        let mut daily_motion = HashMap::new();
        for (i, body) in CelestialBody::ALL.iter().enumerate() {
            base.insert(*body, 7.0 + 31.0 * i as f64);
            daily_motion.insert(*body, 1.0 / (i as f64 + 1.0));
        }
        Self {
            base,
            daily_motion,
            failing: HashSet::new(),
            illumination: Some(IlluminationReading::Detailed {
                fraction: 0.5,
                angle: Some(90.0),
            }),
            phase: Some(PhaseReading::Name("First Quarter".to_string())),
        }
    }

    pub fn failing(mut self, bodies: &[CelestialBody]) -> Self {
        self.failing.extend(bodies.iter().copied());
        self
    }

    /// Every body except the Sun fails, and so does the Moon phase
    pub fn all_but_sun_failing() -> Self {
        let others: Vec<CelestialBody> = CelestialBody::ALL
            .iter()
            .copied()
            .filter(|b| *b != CelestialBody::Sun)
            .collect();
        let mut eph = Self::new().failing(&others);
        eph.illumination = None;
        eph.phase = None;
        eph
    }

    pub fn with_position(mut self, body: CelestialBody, lon: f64, motion: f64) -> Self {
        self.base.insert(body, lon);
        self.daily_motion.insert(body, motion);
        self
    }
}

fn days_since_2000(at: DateTime<Utc>) -> f64 {
    let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
    (at - epoch).num_seconds() as f64 / 86400.0
}

fn failure(body: CelestialBody, at: DateTime<Utc>) -> EphemerisError {
    EphemerisError::CalculationFailed {
        body,
        datetime: at,
        message: "injected failure".to_string(),
    }
}

impl Ephemeris for ScriptedEphemeris {
    fn ecliptic_longitude(
        &self,
        body: CelestialBody,
        at: DateTime<Utc>,
    ) -> Result<f64, EphemerisError> {
        if self.failing.contains(&body) {
            return Err(failure(body, at));
        }
        Ok(self.base[&body] + self.daily_motion[&body] * days_since_2000(at))
    }

    fn moon_illumination(&self, at: DateTime<Utc>) -> Result<IlluminationReading, EphemerisError> {
        self.illumination
            .clone()
            .ok_or_else(|| failure(CelestialBody::Moon, at))
    }

    fn moon_phase(&self, at: DateTime<Utc>) -> Result<PhaseReading, EphemerisError> {
        self.phase.clone().ok_or_else(|| failure(CelestialBody::Moon, at))
    }
}

/// Provider where nothing works
pub struct BrokenEphemeris;

impl Ephemeris for BrokenEphemeris {
    fn ecliptic_longitude(
        &self,
        body: CelestialBody,
        at: DateTime<Utc>,
    ) -> Result<f64, EphemerisError> {
        Err(failure(body, at))
    }

    fn moon_illumination(&self, at: DateTime<Utc>) -> Result<IlluminationReading, EphemerisError> {
        Err(failure(CelestialBody::Moon, at))
    }

    fn moon_phase(&self, at: DateTime<Utc>) -> Result<PhaseReading, EphemerisError> {
        Err(failure(CelestialBody::Moon, at))
    }
}
