//! Moon phase metadata.

use crate::ephemeris::{Ephemeris, EphemerisError, IlluminationReading, PhaseReading};
use crate::settings::EngineSettings;
use crate::zodiac::{normalize, EclipticPosition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Phase names in order of increasing elongation, with their emoji
const PHASE_EMOJIS: [(&str, &str); 8] = [
    ("New Moon", "🌑"),
    ("Waxing Crescent", "🌒"),
    ("First Quarter", "🌓"),
    ("Waxing Gibbous", "🌔"),
    ("Full Moon", "🌕"),
    ("Waning Gibbous", "🌖"),
    ("Last Quarter", "🌗"),
    ("Waning Crescent", "🌘"),
];

pub const DEFAULT_MOON_EMOJI: &str = "🌙";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonPhaseInfo {
    pub phase_name: String,
    /// Lit fraction of the disk, 0..=1
    pub illumination: f64,
    /// Sun-Moon-Earth angle in degrees, 0 at full
    pub phase_angle: f64,
    pub position: EclipticPosition,
    pub emoji: String,
}

pub fn phase_emoji(phase_name: &str) -> &'static str {
    PHASE_EMOJIS
        .iter()
        .find(|(name, _)| *name == phase_name)
        .map(|(_, emoji)| *emoji)
        .unwrap_or(DEFAULT_MOON_EMOJI)
}

/// Classify a Sun-Moon elongation into one of the eight named phases.
///
/// Each name covers a 45° sector centred on its principal angle, so New Moon
/// spans 337.5°..22.5°.
pub fn phase_name_from_elongation(elongation: f64) -> &'static str {
    let sector = (normalize(elongation + 22.5) / 45.0).floor() as usize % 8;
    PHASE_EMOJIS[sector].0
}

/// Phase angle implied by a lit fraction, from `k = (1 + cos i) / 2`
pub fn phase_angle_from_fraction(fraction: f64) -> f64 {
    (2.0 * fraction - 1.0).clamp(-1.0, 1.0).acos().to_degrees()
}

fn usable_fraction(fraction: f64) -> Option<f64> {
    (fraction.is_finite() && (0.0..=1.0).contains(&fraction)).then_some(fraction)
}

/// Illumination fraction and phase angle from whatever shape the provider
/// returned. Unusable answers fall back to the configured fraction.
pub fn resolve_illumination(
    reading: Result<IlluminationReading, EphemerisError>,
    settings: &EngineSettings,
) -> (f64, f64) {
    let resolved = match reading {
        Ok(IlluminationReading::Fraction(fraction)) => {
            usable_fraction(fraction).map(|f| (f, phase_angle_from_fraction(f)))
        }
        Ok(IlluminationReading::Detailed { fraction, angle }) => usable_fraction(fraction).map(|f| {
            let angle = angle
                .filter(|a| a.is_finite())
                .unwrap_or_else(|| phase_angle_from_fraction(f));
            (f, angle)
        }),
        Ok(IlluminationReading::Unrecognized(value)) => {
            log::debug!("Unrecognized illumination shape: {}", value);
            None
        }
        Err(e) => {
            log::warn!("Moon illumination unavailable: {}", e);
            None
        }
    };

    resolved.unwrap_or_else(|| {
        let fraction = settings.fallback_illumination;
        log::warn!("Using fallback moon illumination {:.2}", fraction);
        (fraction, phase_angle_from_fraction(fraction))
    })
}

/// Phase name from the provider's classification or elongation
pub fn resolve_phase_name(
    reading: Result<PhaseReading, EphemerisError>,
    settings: &EngineSettings,
) -> String {
    let resolved = match reading {
        Ok(PhaseReading::Name(name)) => {
            let name = name.trim();
            if name.is_empty() {
                None
            } else {
                // Canonical spelling when it is one of ours, verbatim otherwise
                Some(
                    PHASE_EMOJIS
                        .iter()
                        .find(|(known, _)| known.eq_ignore_ascii_case(name))
                        .map(|(known, _)| known.to_string())
                        .unwrap_or_else(|| name.to_string()),
                )
            }
        }
        Ok(PhaseReading::Elongation(elongation)) if elongation.is_finite() => {
            Some(phase_name_from_elongation(elongation).to_string())
        }
        Ok(other) => {
            log::debug!("Unrecognized moon phase shape: {:?}", other);
            None
        }
        Err(e) => {
            log::warn!("Moon phase unavailable: {}", e);
            None
        }
    };
    resolved.unwrap_or_else(|| settings.fallback_phase_name.clone())
}

/// Build the Moon's phase record for an instant. Never fails.
pub fn moon_phase_info<E: Ephemeris + ?Sized>(
    provider: &E,
    at: DateTime<Utc>,
    position: EclipticPosition,
    settings: &EngineSettings,
) -> MoonPhaseInfo {
    let (illumination, phase_angle) = resolve_illumination(provider.moon_illumination(at), settings);
    let phase_name = resolve_phase_name(provider.moon_phase(at), settings);
    let emoji = phase_emoji(&phase_name).to_string();
    MoonPhaseInfo {
        phase_name,
        illumination,
        phase_angle,
        position,
        emoji,
    }
}
