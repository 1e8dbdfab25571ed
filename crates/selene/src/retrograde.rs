//! Apparent retrograde detection by finite differences.
//!
//! The body's longitude is sampled at `t` and `t + window`; a net decrease
//! along the shortest arc means the body is moving backwards.

use crate::ephemeris::{CelestialBody, Ephemeris, EphemerisError};
use chrono::{DateTime, Duration, Utc};

/// Default gap between the two samples
pub const DEFAULT_WINDOW_HOURS: i64 = 6;

/// Longest usable gap; beyond a month the two samples straddle whole loops
pub const MAX_WINDOW_HOURS: f64 = 720.0;

/// Signed change along the shortest arc, in `[-180, 180]`
pub fn shortest_arc(diff: f64) -> f64 {
    let mut diff = diff;
    if diff > 180.0 {
        diff -= 360.0;
    }
    if diff < -180.0 {
        diff += 360.0;
    }
    diff
}

/// Whether the move from `lon0` to `lon1` runs backwards along the ecliptic
pub fn motion_is_retrograde(lon0: f64, lon1: f64) -> bool {
    shortest_arc(lon1 - lon0) < 0.0
}

/// Sample the provider twice and report the direction of motion.
///
/// Sun and Moon are never retrograde and are answered without sampling.
pub fn detect_retrograde<E: Ephemeris + ?Sized>(
    provider: &E,
    body: CelestialBody,
    at: DateTime<Utc>,
    window: Duration,
) -> Result<bool, EphemerisError> {
    if !body.can_retrograde() {
        return Ok(false);
    }
    let later = at
        .checked_add_signed(window)
        .ok_or_else(|| EphemerisError::CalculationFailed {
            body,
            datetime: at,
            message: format!("second sample {} past the representable range", window),
        })?;
    let lon0 = provider.ecliptic_longitude(body, at)?;
    let lon1 = provider.ecliptic_longitude(body, later)?;
    Ok(motion_is_retrograde(lon0, lon1))
}

/// Like [`detect_retrograde`], but a provider failure degrades to `false`
pub fn is_retrograde<E: Ephemeris + ?Sized>(
    provider: &E,
    body: CelestialBody,
    at: DateTime<Utc>,
    window: Duration,
) -> bool {
    match detect_retrograde(provider, body, at, window) {
        Ok(retrograde) => retrograde,
        Err(e) => {
            log::warn!("Retrograde check for {} degraded to direct motion: {}", body, e);
            false
        }
    }
}
