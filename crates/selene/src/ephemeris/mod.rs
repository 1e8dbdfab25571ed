pub mod kepler;
pub mod provider;
pub mod types;

pub use kepler::{julian_day, KeplerEphemeris};
pub use provider::{Ephemeris, EphemerisError};
pub use types::{CelestialBody, IlluminationReading, PhaseReading};
