//! Built-in low-precision ephemeris.
//!
//! Planets come from the 1800-2050 Keplerian element set (mean elements with
//! linear rates per Julian century), rotated from the J2000 ecliptic to the
//! ecliptic of date with a linear general-precession term. The Moon uses the
//! leading terms of the lunar longitude series. Accuracy is a fraction of a
//! degree for the planets and a few tenths of a degree for the Moon, which is
//! plenty for sign placement.

use crate::ephemeris::provider::{Ephemeris, EphemerisError};
use crate::ephemeris::types::{CelestialBody, IlluminationReading, PhaseReading};
use crate::zodiac::normalize;
use chrono::{DateTime, Datelike, Utc};

const J2000_JD: f64 = 2451545.0;
const UNIX_EPOCH_JD: f64 = 2440587.5;
const DAYS_PER_CENTURY: f64 = 36525.0;

/// General precession in longitude, degrees per Julian century
const PRECESSION_PER_CENTURY: f64 = 1.396_971_3;

/// Mean orbital elements at J2000 and their rates per century.
///
/// Order: semi-major axis (au), eccentricity, inclination, mean longitude,
/// longitude of perihelion, longitude of ascending node (degrees).
struct OrbitalElements {
    base: [f64; 6],
    rate: [f64; 6],
}

const MERCURY: OrbitalElements = OrbitalElements {
    base: [0.38709927, 0.20563593, 7.00497902, 252.25032350, 77.45779628, 48.33076593],
    rate: [0.00000037, 0.00001906, -0.00594749, 149472.67411175, 0.16047689, -0.12534081],
};

const VENUS: OrbitalElements = OrbitalElements {
    base: [0.72333566, 0.00677672, 3.39467605, 181.97909950, 131.60246718, 76.67984255],
    rate: [0.00000390, -0.00004107, -0.00078890, 58517.81538729, 0.00268329, -0.27769418],
};

const EARTH_MOON_BARYCENTER: OrbitalElements = OrbitalElements {
    base: [1.00000261, 0.01671123, -0.00001531, 100.46457166, 102.93768193, 0.0],
    rate: [0.00000562, -0.00004392, -0.01294668, 35999.37244981, 0.32327364, 0.0],
};

const MARS: OrbitalElements = OrbitalElements {
    base: [1.52371034, 0.09339410, 1.84969142, -4.55343205, -23.94362959, 49.55953891],
    rate: [0.00001847, 0.00007882, -0.00813131, 19140.30268499, 0.44441088, -0.29257343],
};

const JUPITER: OrbitalElements = OrbitalElements {
    base: [5.20288700, 0.04838624, 1.30439695, 34.39644051, 14.72847983, 100.47390909],
    rate: [-0.00011607, -0.00013253, -0.00183714, 3034.74612775, 0.21252668, 0.20469106],
};

const SATURN: OrbitalElements = OrbitalElements {
    base: [9.53667594, 0.05386179, 2.48599187, 49.95424423, 92.59887831, 113.66242448],
    rate: [-0.00125060, -0.00050991, 0.00193609, 1222.49362201, -0.41897216, -0.28867794],
};

const URANUS: OrbitalElements = OrbitalElements {
    base: [19.18916464, 0.04725744, 0.77263783, 313.23810451, 170.95427630, 74.01692503],
    rate: [-0.00196176, -0.00004397, -0.00242939, 428.48202785, 0.40805281, 0.04240589],
};

const NEPTUNE: OrbitalElements = OrbitalElements {
    base: [30.06992276, 0.00859048, 1.77004347, -55.12002969, 44.96476227, 131.78422574],
    rate: [0.00026291, 0.00005105, 0.00035372, 218.45945325, -0.32241464, -0.00508664],
};

const PLUTO: OrbitalElements = OrbitalElements {
    base: [39.48211675, 0.24882730, 17.14001206, 238.92903833, 224.06891629, 110.30393684],
    rate: [-0.00031596, 0.00005170, 0.00004818, 145.20780515, -0.04062942, -0.01183482],
};

fn planet_elements(body: CelestialBody) -> Option<&'static OrbitalElements> {
    match body {
        CelestialBody::Mercury => Some(&MERCURY),
        CelestialBody::Venus => Some(&VENUS),
        CelestialBody::Mars => Some(&MARS),
        CelestialBody::Jupiter => Some(&JUPITER),
        CelestialBody::Saturn => Some(&SATURN),
        CelestialBody::Uranus => Some(&URANUS),
        CelestialBody::Neptune => Some(&NEPTUNE),
        CelestialBody::Pluto => Some(&PLUTO),
        CelestialBody::Sun | CelestialBody::Moon => None,
    }
}

/// Analytic ephemeris valid for a bounded range of years
#[derive(Debug, Clone)]
pub struct KeplerEphemeris {
    min_year: i32,
    max_year: i32,
}

impl KeplerEphemeris {
    pub fn new() -> Self {
        Self {
            min_year: 1800,
            max_year: 2050,
        }
    }

    /// Narrow or widen the accepted year range. Outside it every call fails
    /// with [`EphemerisError::OutOfRange`].
    pub fn with_year_range(min_year: i32, max_year: i32) -> Self {
        Self { min_year, max_year }
    }

    fn centuries_since_j2000(&self, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        if at.year() < self.min_year || at.year() > self.max_year {
            return Err(EphemerisError::OutOfRange {
                datetime: at,
                min_year: self.min_year,
                max_year: self.max_year,
            });
        }
        Ok((julian_day(at) - J2000_JD) / DAYS_PER_CENTURY)
    }

    fn sun_longitude(&self, t: f64) -> f64 {
        let [x, y, _] = heliocentric_position(&EARTH_MOON_BARYCENTER, t);
        normalize(y.atan2(x).to_degrees() + 180.0 + PRECESSION_PER_CENTURY * t)
    }

    fn planet_longitude(&self, elements: &OrbitalElements, t: f64) -> f64 {
        let [xe, ye, _] = heliocentric_position(&EARTH_MOON_BARYCENTER, t);
        let [xp, yp, _] = heliocentric_position(elements, t);
        normalize((yp - ye).atan2(xp - xe).to_degrees() + PRECESSION_PER_CENTURY * t)
    }

    /// Elongation of the Moon east of the Sun, 0..360
    fn elongation(&self, t: f64) -> f64 {
        normalize(moon_longitude(t) - self.sun_longitude(t))
    }
}

impl Default for KeplerEphemeris {
    fn default() -> Self {
        Self::new()
    }
}

impl Ephemeris for KeplerEphemeris {
    fn ecliptic_longitude(
        &self,
        body: CelestialBody,
        at: DateTime<Utc>,
    ) -> Result<f64, EphemerisError> {
        let t = self.centuries_since_j2000(at)?;
        let lon = match body {
            CelestialBody::Sun => self.sun_longitude(t),
            CelestialBody::Moon => moon_longitude(t),
            planet => {
                let elements =
                    planet_elements(planet).ok_or_else(|| EphemerisError::CalculationFailed {
                        body: planet,
                        datetime: at,
                        message: "no orbital elements".to_string(),
                    })?;
                self.planet_longitude(elements, t)
            }
        };
        if !lon.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body,
                datetime: at,
                message: "non-finite longitude".to_string(),
            });
        }
        Ok(lon)
    }

    fn moon_illumination(&self, at: DateTime<Utc>) -> Result<IlluminationReading, EphemerisError> {
        let t = self.centuries_since_j2000(at)?;
        let elongation = self.elongation(t);
        // Phase angle seen from the Moon is the supplement of the elongation
        // when the Moon's distance is neglected against the Sun's.
        let phase_angle = 180.0 - elongation_magnitude(elongation);
        let fraction = (1.0 + phase_angle.to_radians().cos()) / 2.0;
        Ok(IlluminationReading::Detailed {
            fraction,
            angle: Some(phase_angle),
        })
    }

    fn moon_phase(&self, at: DateTime<Utc>) -> Result<PhaseReading, EphemerisError> {
        let t = self.centuries_since_j2000(at)?;
        Ok(PhaseReading::Elongation(self.elongation(t)))
    }
}

/// Julian day (UT) of an instant
pub fn julian_day(at: DateTime<Utc>) -> f64 {
    let seconds = at.timestamp() as f64 + f64::from(at.timestamp_subsec_nanos()) * 1e-9;
    seconds / 86400.0 + UNIX_EPOCH_JD
}

fn elongation_magnitude(elongation: f64) -> f64 {
    if elongation > 180.0 {
        360.0 - elongation
    } else {
        elongation
    }
}

fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let mut ea = mean_anomaly + e * mean_anomaly.sin();
    for _ in 0..10 {
        let delta = (ea - e * ea.sin() - mean_anomaly) / (1.0 - e * ea.cos());
        ea -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ea
}

/// Heliocentric ecliptic coordinates (J2000 frame, au)
fn heliocentric_position(elements: &OrbitalElements, t: f64) -> [f64; 3] {
    let el = |i: usize| elements.base[i] + elements.rate[i] * t;
    let a = el(0);
    let e = el(1);
    let incl = el(2).to_radians();
    let mean_lon = el(3);
    let long_peri = el(4);
    let long_node = el(5);

    let arg_peri = (long_peri - long_node).to_radians();
    let node = long_node.to_radians();
    // Keep M in (-180, 180] so Newton's method starts close to the root
    let mut mean_anomaly = normalize(mean_lon - long_peri);
    if mean_anomaly > 180.0 {
        mean_anomaly -= 360.0;
    }
    let ea = solve_kepler(mean_anomaly.to_radians(), e);

    let x_orb = a * (ea.cos() - e);
    let y_orb = a * (1.0 - e * e).sqrt() * ea.sin();

    let (sin_w, cos_w) = arg_peri.sin_cos();
    let (sin_om, cos_om) = node.sin_cos();
    let (sin_i, cos_i) = incl.sin_cos();

    let x = (cos_w * cos_om - sin_w * sin_om * cos_i) * x_orb
        + (-sin_w * cos_om - cos_w * sin_om * cos_i) * y_orb;
    let y = (cos_w * sin_om + sin_w * cos_om * cos_i) * x_orb
        + (-sin_w * sin_om + cos_w * cos_om * cos_i) * y_orb;
    let z = (sin_w * sin_i) * x_orb + (cos_w * sin_i) * y_orb;
    [x, y, z]
}

/// Geocentric ecliptic longitude of the Moon, mean equinox of date
fn moon_longitude(t: f64) -> f64 {
    let mean_lon = 218.3164477 + 481267.88123421 * t;
    let d = (297.8501921 + 445267.1114034 * t).to_radians();
    let m = (357.5291092 + 35999.0502909 * t).to_radians();
    let mp = (134.9633964 + 477198.8675055 * t).to_radians();
    let f = (93.2720950 + 483202.0175233 * t).to_radians();

    let correction = 6.288774 * mp.sin()
        + 1.274027 * (2.0 * d - mp).sin()
        + 0.658314 * (2.0 * d).sin()
        + 0.213618 * (2.0 * mp).sin()
        - 0.185116 * m.sin()
        - 0.114332 * (2.0 * f).sin()
        + 0.058793 * (2.0 * d - 2.0 * mp).sin()
        + 0.057066 * (2.0 * d - m - mp).sin()
        + 0.053322 * (2.0 * d + mp).sin()
        + 0.045758 * (2.0 * d - m).sin()
        - 0.040923 * (m - mp).sin()
        - 0.034720 * d.sin()
        - 0.030383 * (m + mp).sin();

    normalize(mean_lon + correction)
}
