//! Fallback policies shared by the snapshot and natal chart services.

use crate::ephemeris::{CelestialBody, EphemerisError};
use crate::reading::{BodyReading, FallbackKind, Resolved};
use crate::sky::SkySnapshot;
use crate::zodiac::{normalize, sign_from_longitude, sun_sign_for_date, EclipticPosition};
use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Mean longitude of the Sun at day zero of the year model
const SUN_MEAN_LONGITUDE_BASE: f64 = 280.46;
/// Mean daily motion of the Sun, degrees per day
const SUN_MEAN_DAILY_MOTION: f64 = 0.9856474;

/// Closed-form solar longitude from the day of the year.
///
/// Good to about a sign, and always geocentric.
pub fn mean_sun_longitude(at: DateTime<Utc>) -> f64 {
    let day_of_year = f64::from(at.ordinal());
    normalize(SUN_MEAN_LONGITUDE_BASE + SUN_MEAN_DAILY_MOTION * day_of_year)
}

/// Fixed Aries 0° placeholder
pub fn degenerate_reading(body: CelestialBody) -> BodyReading {
    BodyReading {
        body,
        position: sign_from_longitude(0.0),
        retrograde: false,
        fallback: Some(FallbackKind::Degenerate),
    }
}

/// Sun placed by calendar date at a placeholder degree
pub fn calendar_sun_reading(date: NaiveDate, degree: f64) -> BodyReading {
    BodyReading {
        body: CelestialBody::Sun,
        position: EclipticPosition::within_sign(sun_sign_for_date(date), degree),
        retrograde: false,
        fallback: Some(FallbackKind::SunCalendar),
    }
}

/// A body's current-sky reading used as a stand-in for another instant.
///
/// A current-sky placeholder stays flagged `Degenerate`; only a real
/// current position is reported as `CurrentSky`.
pub fn current_sky_reading(snapshot: &SkySnapshot, body: CelestialBody) -> BodyReading {
    match snapshot.reading(body) {
        Some(reading) if reading.fallback == Some(FallbackKind::Degenerate) => reading.clone(),
        Some(reading) => BodyReading {
            fallback: Some(FallbackKind::CurrentSky),
            ..reading.clone()
        },
        None => degenerate_reading(body),
    }
}

/// Keep a computed reading, or log the failure and take the stand-in
pub fn resolve_reading<F>(
    context: &str,
    body: CelestialBody,
    computed: Result<BodyReading, EphemerisError>,
    fallback: F,
) -> Resolved<BodyReading>
where
    F: FnOnce() -> BodyReading,
{
    match computed {
        Ok(reading) => Resolved::Computed(reading),
        Err(e) => {
            let value = fallback();
            log::warn!(
                "{}: {} unavailable ({}), using {:?} stand-in {} {:.2}",
                context,
                body,
                e,
                value.fallback,
                value.position.sign,
                value.position.degree
            );
            Resolved::Fallback {
                value,
                reason: e.to_string(),
            }
        }
    }
}
