//! JSON shapes handed to callers.
//!
//! Internal values keep full precision; these views round the way the
//! published format always has (longitude 4 places, degree 2, illumination
//! 4, phase angle 2).

use crate::aspects::Aspect;
use crate::chart::{House, NatalChart};
use crate::reading::{BodyReading, FallbackKind};
use crate::sky::SkySnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonView {
    pub phase_name: String,
    pub illumination: f64,
    pub phase_angle: f64,
    pub sign: String,
    pub sign_name: String,
    pub degree: f64,
    pub emoji: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkyPlanetView {
    pub longitude: f64,
    pub sign: String,
    pub sign_name: String,
    pub degree: f64,
    pub retrograde: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotView {
    pub timestamp: DateTime<Utc>,
    pub moon: MoonView,
    pub planets: BTreeMap<String, SkyPlanetView>,
}

impl From<&BodyReading> for SkyPlanetView {
    fn from(reading: &BodyReading) -> Self {
        Self {
            longitude: round_to(reading.position.longitude, 4),
            sign: reading.position.sign.key().to_string(),
            sign_name: reading.position.sign.name().to_string(),
            degree: round_to(reading.position.degree, 2),
            retrograde: reading.retrograde,
            fallback: reading.fallback,
        }
    }
}

impl From<&SkySnapshot> for SnapshotView {
    fn from(snapshot: &SkySnapshot) -> Self {
        let moon = &snapshot.moon;
        Self {
            timestamp: snapshot.timestamp,
            moon: MoonView {
                phase_name: moon.phase_name.clone(),
                illumination: round_to(moon.illumination, 4),
                phase_angle: round_to(moon.phase_angle, 2),
                sign: moon.position.sign.key().to_string(),
                sign_name: moon.position.sign.name().to_string(),
                degree: round_to(moon.position.degree, 2),
                emoji: moon.emoji.clone(),
            },
            planets: snapshot
                .readings()
                .map(|r| (r.body.key().to_string(), SkyPlanetView::from(r)))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalPlanetView {
    pub planet: String,
    pub sign: String,
    pub degree: f64,
    pub longitude: f64,
    pub retrograde: bool,
    pub symbol: String,
    pub house: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseView {
    pub house: u8,
    pub sign: String,
    pub degree: f64,
}

impl From<&House> for HouseView {
    fn from(house: &House) -> Self {
        Self {
            house: house.index,
            sign: house.sign.key().to_string(),
            degree: house.degree,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationView {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthDataView {
    pub date: String,
    pub time: String,
    pub location: LocationView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatalBodyView {
    pub planets: Vec<NatalPlanetView>,
    pub houses: Vec<HouseView>,
    pub aspects: Vec<Aspect>,
    pub birth_data: BirthDataView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatalView {
    pub natal: NatalBodyView,
    pub calculated: DateTime<Utc>,
    pub is_astronomical: bool,
}

impl NatalView {
    /// `default_time` is reported when the caller gave no birth time
    pub fn new(chart: &NatalChart, default_time: &str) -> Self {
        let planets = chart
            .planets
            .iter()
            .map(|r| NatalPlanetView {
                planet: r.body.name().to_string(),
                sign: r.position.sign.key().to_string(),
                degree: round_to(r.position.degree, 2),
                longitude: round_to(r.position.longitude, 4),
                retrograde: r.retrograde,
                symbol: r.symbol().to_string(),
                house: crate::chart::houses::house_for_longitude(r.position.longitude),
                fallback: r.fallback,
            })
            .collect();

        let aspects = chart
            .aspects
            .iter()
            .map(|a| Aspect {
                orb: round_to(a.orb, 2),
                ..a.clone()
            })
            .collect();

        let birth = &chart.birth_data;
        Self {
            natal: NatalBodyView {
                planets,
                houses: chart.houses.iter().map(HouseView::from).collect(),
                aspects,
                birth_data: BirthDataView {
                    date: birth.date.clone(),
                    time: birth.effective_time(default_time).to_string(),
                    location: LocationView {
                        lat: birth.lat,
                        lng: birth.lng,
                    },
                },
            },
            calculated: chart.calculated_at,
            is_astronomical: true,
        }
    }
}
