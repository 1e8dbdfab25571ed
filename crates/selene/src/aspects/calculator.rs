use crate::aspects::types::{Aspect, AspectKind, AspectOrbs};
use crate::ephemeris::CelestialBody;
use crate::reading::BodyReading;

/// Orb below which an aspect counts as exact
const EXACT_ORB: f64 = 0.1;

/// Aspect calculator
pub struct AspectCalculator {
    orbs: AspectOrbs,
}

impl AspectCalculator {
    pub fn new(orbs: AspectOrbs) -> Self {
        Self { orbs }
    }

    /// Aspects between every pair of bodies in one chart.
    ///
    /// Readings that are stand-ins rather than computed positions are left
    /// out; a placeholder longitude would produce aspects that do not exist.
    pub fn compute_chart_aspects(&self, readings: &[BodyReading]) -> Vec<Aspect> {
        let bodies: Vec<&BodyReading> = readings.iter().filter(|r| !r.is_approximate()).collect();

        let mut aspects = Vec::new();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (a, b) = (bodies[i], bodies[j]);
                if let Some(aspect) =
                    self.aspect_between(a.body, b.body, a.position.longitude, b.position.longitude)
                {
                    aspects.push(aspect);
                }
            }
        }
        aspects
    }

    /// Aspects from each transiting body to each natal body, including a body
    /// to its own natal place (a Saturn return is transiting Saturn
    /// conjunct natal Saturn).
    pub fn compute_transit_aspects(
        &self,
        transiting: &[BodyReading],
        natal: &[BodyReading],
    ) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for t in transiting.iter().filter(|r| !r.is_approximate()) {
            for n in natal.iter().filter(|r| !r.is_approximate()) {
                if let Some(aspect) =
                    self.aspect_between(t.body, n.body, t.position.longitude, n.position.longitude)
                {
                    aspects.push(aspect);
                }
            }
        }
        aspects
    }

    fn aspect_between(
        &self,
        from: CelestialBody,
        to: CelestialBody,
        lon1: f64,
        lon2: f64,
    ) -> Option<Aspect> {
        let (aspect, orb) = self.calculate_aspect(lon1, lon2)?;
        Some(Aspect {
            from,
            to,
            aspect,
            exact_angle: aspect.exact_angle(),
            orb,
            is_exact: orb < EXACT_ORB,
        })
    }

    /// Closest matching aspect between two longitudes and its orb
    pub fn calculate_aspect(&self, lon1: f64, lon2: f64) -> Option<(AspectKind, f64)> {
        // Angular separation folded into 0..=180
        let raw_diff = (lon1 - lon2).abs() % 360.0;
        let angle_diff = if raw_diff > 180.0 {
            360.0 - raw_diff
        } else {
            raw_diff
        };

        AspectKind::ALL.iter().find_map(|&kind| {
            let orb = (angle_diff - kind.exact_angle()).abs();
            (orb <= self.orbs.orb_for(kind)).then_some((kind, orb))
        })
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new(AspectOrbs::default())
    }
}
