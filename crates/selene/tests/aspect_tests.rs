mod common;

use common::{utc, ScriptedEphemeris};
use selene::aspects::{Aspect, AspectKind};
use selene::chart::natal_chart_at;
use selene::ephemeris::CelestialBody;
use selene::{BirthData, Engine, EngineSettings};

/// Birth at the scripted epoch, so each body sits exactly at its base longitude
fn epoch_birth() -> BirthData {
    BirthData::new("2000-01-01", Some("00:00"), 0.0, 0.0)
}

fn scripted_sky() -> ScriptedEphemeris {
    ScriptedEphemeris::new()
        .with_position(CelestialBody::Sun, 10.0, 1.0)
        .with_position(CelestialBody::Moon, 130.0, 13.0)
        .with_position(CelestialBody::Mercury, 100.5, 1.2)
        .with_position(CelestialBody::Venus, 70.0, 1.1)
        .with_position(CelestialBody::Mars, 190.0, 0.5)
        .with_position(CelestialBody::Saturn, 200.0, 0.0)
}

fn find(aspects: &[Aspect], from: CelestialBody, to: CelestialBody) -> Option<&Aspect> {
    aspects.iter().find(|a| a.from == from && a.to == to)
}

#[test]
fn test_chart_aspects() {
    let chart = natal_chart_at(
        &scripted_sky(),
        &epoch_birth(),
        &EngineSettings::default(),
        utc(2024, 6, 1, 12, 0),
    )
    .unwrap();

    let trine = find(&chart.aspects, CelestialBody::Sun, CelestialBody::Moon).unwrap();
    assert_eq!(trine.aspect, AspectKind::Trine);
    assert!(trine.orb < 1e-9);
    assert!(trine.is_exact);

    let square = find(&chart.aspects, CelestialBody::Sun, CelestialBody::Mercury).unwrap();
    assert_eq!(square.aspect, AspectKind::Square);
    assert!((square.orb - 0.5).abs() < 1e-9);
    assert!(!square.is_exact);

    let sextile = find(&chart.aspects, CelestialBody::Sun, CelestialBody::Venus).unwrap();
    assert_eq!(sextile.aspect, AspectKind::Sextile);

    let opposition = find(&chart.aspects, CelestialBody::Sun, CelestialBody::Mars).unwrap();
    assert_eq!(opposition.aspect, AspectKind::Opposition);
    assert_eq!(opposition.exact_angle, 180.0);

    // Mars 190 and Saturn 200 are ten degrees apart
    let conjunction = find(&chart.aspects, CelestialBody::Mars, CelestialBody::Saturn).unwrap();
    assert_eq!(conjunction.aspect, AspectKind::Conjunction);
}

#[test]
fn test_chart_aspects_skip_stand_ins() {
    let eph = scripted_sky().failing(&[CelestialBody::Mars]);
    let chart = natal_chart_at(&eph, &epoch_birth(), &EngineSettings::default(), utc(2024, 6, 1, 12, 0))
        .unwrap();

    assert!(chart
        .aspects
        .iter()
        .all(|a| a.from != CelestialBody::Mars && a.to != CelestialBody::Mars));
    assert!(find(&chart.aspects, CelestialBody::Sun, CelestialBody::Moon).is_some());
}

#[test]
fn test_configured_orbs() {
    let eph = scripted_sky().with_position(CelestialBody::Moon, 135.0, 13.0);
    let birth = epoch_birth();
    let now = utc(2024, 6, 1, 12, 0);

    let loose = natal_chart_at(&eph, &birth, &EngineSettings::default(), now).unwrap();
    let trine = find(&loose.aspects, CelestialBody::Sun, CelestialBody::Moon).unwrap();
    assert!((trine.orb - 5.0).abs() < 1e-9);

    let mut settings = EngineSettings::default();
    settings.orbs.trine = 2.0;
    let tight = natal_chart_at(&eph, &birth, &settings, now).unwrap();
    assert!(find(&tight.aspects, CelestialBody::Sun, CelestialBody::Moon).is_none());
}

#[test]
fn test_transits_to_natal() {
    let engine = Engine::new(scripted_sky());
    let natal = engine.natal_chart_at(&epoch_birth(), utc(2024, 6, 1, 12, 0)).unwrap();
    let current = engine.snapshot_at(utc(2024, 6, 1, 12, 0));
    let transits = engine.transits(&natal, &current);

    // Saturn does not move in this sky, so it returns to its own place
    let saturn_return = find(&transits, CelestialBody::Saturn, CelestialBody::Saturn).unwrap();
    assert_eq!(saturn_return.aspect, AspectKind::Conjunction);
    assert!(saturn_return.is_exact);

    for aspect in &transits {
        let orb = engine.settings().orbs.orb_for(aspect.aspect);
        assert!(aspect.orb <= orb);
    }
}

#[test]
fn test_transits_skip_degraded_current_bodies() {
    let natal_engine = Engine::new(scripted_sky());
    let natal = natal_engine
        .natal_chart_at(&epoch_birth(), utc(2024, 6, 1, 12, 0))
        .unwrap();

    let sky_engine = Engine::new(scripted_sky().failing(&[CelestialBody::Saturn]));
    let current = sky_engine.snapshot_at(utc(2024, 6, 1, 12, 0));
    let transits = sky_engine.transits(&natal, &current);

    assert!(transits.iter().all(|a| a.from != CelestialBody::Saturn));
}

#[test]
fn test_aspect_wire_shape() {
    let chart = natal_chart_at(
        &scripted_sky(),
        &epoch_birth(),
        &EngineSettings::default(),
        utc(2024, 6, 1, 12, 0),
    )
    .unwrap();
    let trine = find(&chart.aspects, CelestialBody::Sun, CelestialBody::Moon).unwrap();
    let json = serde_json::to_value(trine).unwrap();

    assert_eq!(json["from"], "sun");
    assert_eq!(json["to"], "moon");
    assert_eq!(json["aspect"], "trine");
    assert_eq!(json["exactAngle"], 120.0);
    assert_eq!(json["isExact"], true);
}
