pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod fallback;
pub mod reading;
pub mod retrograde;
pub mod settings;
pub mod sky;
pub mod wire;
pub mod zodiac;

pub use chart::{BirthData, ChartError, NatalChart};
pub use ephemeris::{CelestialBody, Ephemeris, EphemerisError, KeplerEphemeris};
pub use reading::{BodyReading, FallbackKind};
pub use settings::EngineSettings;
pub use sky::{MoonPhaseInfo, SkySnapshot};
pub use wire::{NatalView, SnapshotView};
pub use zodiac::{normalize, sign_from_longitude, EclipticPosition, Sign};

use aspects::Aspect;
use chrono::{DateTime, Utc};

/// A provider paired with settings. Holds no mutable state, so one engine
/// can serve concurrent callers when the provider is `Sync`.
#[derive(Debug, Clone)]
pub struct Engine<E> {
    provider: E,
    settings: EngineSettings,
}

impl Engine<KeplerEphemeris> {
    /// Engine backed by the built-in analytic ephemeris
    pub fn builtin() -> Self {
        Self::new(KeplerEphemeris::new())
    }
}

impl<E: Ephemeris> Engine<E> {
    pub fn new(provider: E) -> Self {
        Self::with_settings(provider, EngineSettings::default())
    }

    pub fn with_settings(provider: E, settings: EngineSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn provider(&self) -> &E {
        &self.provider
    }

    pub fn snapshot_at(&self, at: DateTime<Utc>) -> SkySnapshot {
        sky::snapshot(&self.provider, at, &self.settings)
    }

    pub fn snapshot_now(&self) -> SkySnapshot {
        self.snapshot_at(Utc::now())
    }

    pub fn natal_chart(&self, birth: &BirthData) -> Result<NatalChart, ChartError> {
        chart::natal_chart(&self.provider, birth, &self.settings)
    }

    /// Natal chart with an explicit calculation time, which also fixes the
    /// instant used for current-sky stand-ins
    pub fn natal_chart_at(
        &self,
        birth: &BirthData,
        now: DateTime<Utc>,
    ) -> Result<NatalChart, ChartError> {
        chart::natal_chart_at(&self.provider, birth, &self.settings, now)
    }

    pub fn transits(&self, natal: &NatalChart, current: &SkySnapshot) -> Vec<Aspect> {
        chart::transits(natal, current, &self.settings)
    }
}
