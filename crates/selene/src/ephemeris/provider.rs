use crate::ephemeris::types::{CelestialBody, IlluminationReading, PhaseReading};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Failed to calculate position for {body} at {datetime}: {message}")]
    CalculationFailed {
        body: CelestialBody,
        datetime: DateTime<Utc>,
        message: String,
    },
    #[error("{datetime} is outside the supported range {min_year}..={max_year}")]
    OutOfRange {
        datetime: DateTime<Utc>,
        min_year: i32,
        max_year: i32,
    },
    #[error("{what} is not supported by this provider")]
    Unsupported { what: String },
}

/// Source of raw positions for the engine.
///
/// Implementations are plain blocking computations. Any call may fail for a
/// given body or instant; the engine absorbs those failures through its
/// fallback chains and never retries.
pub trait Ephemeris {
    /// Geocentric ecliptic longitude of date, in degrees. Need not be normalized.
    fn ecliptic_longitude(
        &self,
        body: CelestialBody,
        at: DateTime<Utc>,
    ) -> Result<f64, EphemerisError>;

    fn moon_illumination(&self, at: DateTime<Utc>) -> Result<IlluminationReading, EphemerisError>;

    fn moon_phase(&self, at: DateTime<Utc>) -> Result<PhaseReading, EphemerisError>;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn ecliptic_longitude(
        &self,
        body: CelestialBody,
        at: DateTime<Utc>,
    ) -> Result<f64, EphemerisError> {
        (**self).ecliptic_longitude(body, at)
    }

    fn moon_illumination(&self, at: DateTime<Utc>) -> Result<IlluminationReading, EphemerisError> {
        (**self).moon_illumination(at)
    }

    fn moon_phase(&self, at: DateTime<Utc>) -> Result<PhaseReading, EphemerisError> {
        (**self).moon_phase(at)
    }
}
