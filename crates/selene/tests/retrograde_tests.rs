mod common;

use chrono::{DateTime, Duration, Utc};
use common::utc;
use selene::ephemeris::{CelestialBody, Ephemeris, EphemerisError, IlluminationReading, PhaseReading};
use selene::retrograde::{detect_retrograde, is_retrograde, motion_is_retrograde, shortest_arc};
use std::cell::Cell;

/// Answers `first` at `start` and `second` at any other instant
struct TwoSamples {
    start: DateTime<Utc>,
    first: f64,
    second: f64,
    fail_second: bool,
    calls: Cell<usize>,
}

impl TwoSamples {
    fn new(start: DateTime<Utc>, first: f64, second: f64) -> Self {
        Self {
            start,
            first,
            second,
            fail_second: false,
            calls: Cell::new(0),
        }
    }
}

impl Ephemeris for TwoSamples {
    fn ecliptic_longitude(
        &self,
        body: CelestialBody,
        at: DateTime<Utc>,
    ) -> Result<f64, EphemerisError> {
        self.calls.set(self.calls.get() + 1);
        if at == self.start {
            Ok(self.first)
        } else if self.fail_second {
            Err(EphemerisError::CalculationFailed {
                body,
                datetime: at,
                message: "second sample".to_string(),
            })
        } else {
            Ok(self.second)
        }
    }

    fn moon_illumination(&self, _at: DateTime<Utc>) -> Result<IlluminationReading, EphemerisError> {
        Err(EphemerisError::Unsupported {
            what: "illumination".to_string(),
        })
    }

    fn moon_phase(&self, _at: DateTime<Utc>) -> Result<PhaseReading, EphemerisError> {
        Err(EphemerisError::Unsupported {
            what: "phase".to_string(),
        })
    }
}

#[test]
fn test_wrap_correction() {
    assert_eq!(shortest_arc(190.0), -170.0);
    assert!(motion_is_retrograde(0.0, 190.0));

    assert_eq!(shortest_arc(-190.0), 170.0);
    assert!(!motion_is_retrograde(190.0, 0.0));

    assert!(!motion_is_retrograde(100.0, 110.0));
}

#[test]
fn test_detects_retrograde_from_samples() {
    let t = utc(2024, 4, 10, 0, 0);
    let window = Duration::hours(6);

    // raw +190 is really -170
    let eph = TwoSamples::new(t, 10.0, 200.0);
    assert!(is_retrograde(&eph, CelestialBody::Mercury, t, window));

    // raw -190 is really +170
    let eph = TwoSamples::new(t, 200.0, 10.0);
    assert!(!is_retrograde(&eph, CelestialBody::Mercury, t, window));

    let eph = TwoSamples::new(t, 100.0, 110.0);
    assert!(!is_retrograde(&eph, CelestialBody::Mars, t, window));

    let eph = TwoSamples::new(t, 110.0, 109.9);
    assert!(is_retrograde(&eph, CelestialBody::Saturn, t, window));
}

#[test]
fn test_sun_and_moon_never_sampled() {
    let t = utc(2024, 4, 10, 0, 0);
    let eph = TwoSamples::new(t, 110.0, 100.0);
    assert!(!is_retrograde(&eph, CelestialBody::Sun, t, Duration::hours(6)));
    assert!(!is_retrograde(&eph, CelestialBody::Moon, t, Duration::hours(6)));
    assert_eq!(eph.calls.get(), 0);
}

#[test]
fn test_failure_degrades_to_direct() {
    let t = utc(2024, 4, 10, 0, 0);
    let mut eph = TwoSamples::new(t, 110.0, 100.0);
    eph.fail_second = true;

    assert!(detect_retrograde(&eph, CelestialBody::Venus, t, Duration::hours(6)).is_err());
    assert!(!is_retrograde(&eph, CelestialBody::Venus, t, Duration::hours(6)));
}

#[test]
fn test_builtin_mercury_retrograde_station() {
    // Mercury was retrograde from 2024-04-01 to 2024-04-25
    let eph = selene::KeplerEphemeris::new();
    let window = Duration::hours(6);
    assert!(is_retrograde(&eph, CelestialBody::Mercury, utc(2024, 4, 12, 0, 0), window));
    assert!(!is_retrograde(&eph, CelestialBody::Mercury, utc(2024, 3, 1, 0, 0), window));
}

#[test]
fn test_unrepresentable_second_sample_degrades_to_direct() {
    let t = utc(2024, 4, 10, 0, 0);
    let eph = TwoSamples::new(t, 110.0, 100.0);

    let err = detect_retrograde(&eph, CelestialBody::Saturn, t, Duration::MAX).unwrap_err();
    assert!(matches!(err, EphemerisError::CalculationFailed { .. }));
    assert!(!is_retrograde(&eph, CelestialBody::Saturn, t, Duration::MAX));
    // Rejected before the provider is asked anything
    assert_eq!(eph.calls.get(), 0);
}
