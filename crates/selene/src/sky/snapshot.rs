use crate::ephemeris::{CelestialBody, Ephemeris};
use crate::fallback::{degenerate_reading, mean_sun_longitude, resolve_reading};
use crate::reading::{BodyReading, Resolved};
use crate::retrograde::is_retrograde;
use crate::settings::EngineSettings;
use crate::sky::moon::{moon_phase_info, MoonPhaseInfo};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Positions of all ten bodies at one instant, plus the Moon's phase
#[derive(Debug, Clone, PartialEq)]
pub struct SkySnapshot {
    pub timestamp: DateTime<Utc>,
    pub moon: MoonPhaseInfo,
    pub planets: BTreeMap<CelestialBody, BodyReading>,
}

impl SkySnapshot {
    pub fn reading(&self, body: CelestialBody) -> Option<&BodyReading> {
        self.planets.get(&body)
    }

    /// Readings in chart order
    pub fn readings(&self) -> impl Iterator<Item = &BodyReading> {
        CelestialBody::ALL.iter().filter_map(move |body| self.planets.get(body))
    }

    /// Bodies that had to be replaced by a placeholder
    pub fn degraded_bodies(&self) -> Vec<CelestialBody> {
        self.readings()
            .filter(|r| r.is_approximate())
            .map(|r| r.body)
            .collect()
    }
}

/// Compute one body for the snapshot, isolated from the others
fn snapshot_reading<E: Ephemeris + ?Sized>(
    provider: &E,
    body: CelestialBody,
    at: DateTime<Utc>,
    settings: &EngineSettings,
) -> Resolved<BodyReading> {
    if body == CelestialBody::Sun {
        // The Sun comes from the closed-form model, not the provider
        return Resolved::Computed(BodyReading::computed(body, mean_sun_longitude(at), false));
    }

    let computed = provider.ecliptic_longitude(body, at).map(|lon| {
        let retrograde = body.can_retrograde()
            && is_retrograde(provider, body, at, settings.retrograde_window());
        BodyReading::computed(body, lon, retrograde)
    });
    resolve_reading("sky snapshot", body, computed, || degenerate_reading(body))
}

/// Current-sky snapshot for `at`.
///
/// Never fails: a body the provider cannot place becomes an Aries 0°
/// placeholder and an unusable Moon phase answer becomes the configured
/// default.
pub fn snapshot<E: Ephemeris + ?Sized>(
    provider: &E,
    at: DateTime<Utc>,
    settings: &EngineSettings,
) -> SkySnapshot {
    log::info!("Calculating sky snapshot for {}", at.to_rfc3339());

    let planets: BTreeMap<CelestialBody, BodyReading> = CelestialBody::ALL
        .iter()
        .map(|&body| (body, snapshot_reading(provider, body, at, settings).into_value()))
        .collect();

    let moon_position = planets
        .get(&CelestialBody::Moon)
        .map(|r| r.position)
        .unwrap_or_else(|| degenerate_reading(CelestialBody::Moon).position);
    let moon = moon_phase_info(provider, at, moon_position, settings);

    let snapshot = SkySnapshot {
        timestamp: at,
        moon,
        planets,
    };
    let degraded = snapshot.degraded_bodies();
    if !degraded.is_empty() {
        log::warn!("Sky snapshot degraded for {:?}", degraded);
    }
    snapshot
}
