//! Natal chart service.

use crate::aspects::{Aspect, AspectCalculator};
use crate::chart::birth::{parse_birth_date, BirthData, ChartError};
use crate::chart::houses::{equal_houses, house_for_longitude, House};
use crate::ephemeris::{CelestialBody, Ephemeris};
use crate::fallback::{calendar_sun_reading, current_sky_reading, resolve_reading};
use crate::reading::{BodyReading, Resolved};
use crate::retrograde::is_retrograde;
use crate::settings::EngineSettings;
use crate::sky::{snapshot, SkySnapshot};
use chrono::{DateTime, NaiveDate, Utc};
use std::cell::OnceCell;

#[derive(Debug, Clone, PartialEq)]
pub struct NatalChart {
    /// One reading per body, in [`CelestialBody::ALL`] order
    pub planets: Vec<BodyReading>,
    pub houses: Vec<House>,
    pub aspects: Vec<Aspect>,
    pub birth_data: BirthData,
    /// Instant the chart was cast for
    pub birth_instant: DateTime<Utc>,
    pub calculated_at: DateTime<Utc>,
}

impl NatalChart {
    pub fn reading(&self, body: CelestialBody) -> Option<&BodyReading> {
        self.planets.iter().find(|r| r.body == body)
    }

    /// Equal-wheel house holding a body
    pub fn house_of(&self, body: CelestialBody) -> Option<u8> {
        self.reading(body)
            .map(|r| house_for_longitude(r.position.longitude))
    }

    pub fn approximate_bodies(&self) -> Vec<CelestialBody> {
        self.planets
            .iter()
            .filter(|r| r.is_approximate())
            .map(|r| r.body)
            .collect()
    }
}

/// Everything a per-body computation needs
struct NatalContext<'a, E: ?Sized> {
    provider: &'a E,
    settings: &'a EngineSettings,
    birth_instant: DateTime<Utc>,
    birth_date: NaiveDate,
    now: DateTime<Utc>,
    /// Current sky, computed on first use only
    current_sky: OnceCell<SkySnapshot>,
}

impl<'a, E: Ephemeris + ?Sized> NatalContext<'a, E> {
    fn current_sky(&self) -> &SkySnapshot {
        self.current_sky
            .get_or_init(|| snapshot(self.provider, self.now, self.settings))
    }

    fn resolve(&self, body: CelestialBody) -> Resolved<BodyReading> {
        let at = self.birth_instant;
        if body == CelestialBody::Sun {
            let computed = self
                .provider
                .ecliptic_longitude(body, at)
                .map(|lon| BodyReading::computed(body, lon, false));
            return resolve_reading("natal chart", body, computed, || {
                calendar_sun_reading(self.birth_date, self.settings.sun_fallback_degree)
            });
        }

        let computed = self.provider.ecliptic_longitude(body, at).map(|lon| {
            let retrograde = body.can_retrograde()
                && is_retrograde(self.provider, body, at, self.settings.retrograde_window());
            BodyReading::computed(body, lon, retrograde)
        });
        resolve_reading("natal chart", body, computed, || {
            current_sky_reading(self.current_sky(), body)
        })
    }
}

/// Natal chart for `birth`, using `now` as the calculation time and as the
/// instant of the current-sky stand-ins.
///
/// Fails only when the birth data cannot be turned into an instant. Every
/// other failure is absorbed, so the chart always holds ten readings and
/// twelve houses.
pub fn natal_chart_at<E: Ephemeris + ?Sized>(
    provider: &E,
    birth: &BirthData,
    settings: &EngineSettings,
    now: DateTime<Utc>,
) -> Result<NatalChart, ChartError> {
    let birth_instant = birth.instant(&settings.default_birth_time)?;
    let birth_date = parse_birth_date(&birth.date)?;
    if !birth.location_in_range() {
        log::warn!(
            "Birth location ({}, {}) is off the globe; kept as given",
            birth.lat,
            birth.lng
        );
    }
    log::info!("Calculating natal chart for {}", birth_instant.to_rfc3339());

    let ctx = NatalContext {
        provider,
        settings,
        birth_instant,
        birth_date,
        now,
        current_sky: OnceCell::new(),
    };

    let planets: Vec<BodyReading> = CelestialBody::ALL
        .iter()
        .map(|&body| ctx.resolve(body).into_value())
        .collect();

    let approximate = planets.iter().filter(|r| r.is_approximate()).count();
    if approximate > 0 {
        log::warn!(
            "Natal chart for {} has {} approximate placement(s)",
            birth_instant.to_rfc3339(),
            approximate
        );
    }

    let aspects = AspectCalculator::new(settings.orbs.clone()).compute_chart_aspects(&planets);

    Ok(NatalChart {
        planets,
        houses: equal_houses(),
        aspects,
        birth_data: birth.clone(),
        birth_instant,
        calculated_at: now,
    })
}

/// Natal chart calculated now
pub fn natal_chart<E: Ephemeris + ?Sized>(
    provider: &E,
    birth: &BirthData,
    settings: &EngineSettings,
) -> Result<NatalChart, ChartError> {
    natal_chart_at(provider, birth, settings, Utc::now())
}

/// Aspects from the sky of `current` to the bodies of `natal`
pub fn transits(natal: &NatalChart, current: &SkySnapshot, settings: &EngineSettings) -> Vec<Aspect> {
    let transiting: Vec<BodyReading> = current.readings().cloned().collect();
    AspectCalculator::new(settings.orbs.clone()).compute_transit_aspects(&transiting, &natal.planets)
}
