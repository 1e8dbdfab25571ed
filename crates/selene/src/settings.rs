use crate::aspects::AspectOrbs;
use crate::retrograde::{DEFAULT_WINDOW_HOURS, MAX_WINDOW_HOURS};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Tunables shared by the snapshot and natal chart services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Gap between the two longitude samples used for retrograde detection
    pub retrograde_window_hours: f64,
    /// Birth time assumed when none is given, "HH:MM"
    pub default_birth_time: String,
    /// Illumination reported when the provider's answer is unusable
    pub fallback_illumination: f64,
    /// Phase name reported when the provider's answer is unusable
    pub fallback_phase_name: String,
    /// Placeholder degree for a Sun placed from the calendar table
    pub sun_fallback_degree: f64,
    pub orbs: AspectOrbs,
}

impl EngineSettings {
    /// Sampling window as a duration. A value outside
    /// `(0, MAX_WINDOW_HOURS]` is replaced by the default window.
    pub fn retrograde_window(&self) -> Duration {
        let hours = self.retrograde_window_hours;
        let usable = hours.is_finite() && hours > 0.0 && hours <= MAX_WINDOW_HOURS;
        if !usable {
            log::warn!(
                "Retrograde window of {} hours is unusable, using {} hours",
                hours,
                DEFAULT_WINDOW_HOURS
            );
        }
        usable
            .then(|| Duration::try_seconds((hours * 3600.0).round() as i64))
            .flatten()
            .unwrap_or_else(|| Duration::hours(DEFAULT_WINDOW_HOURS))
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            retrograde_window_hours: DEFAULT_WINDOW_HOURS as f64,
            default_birth_time: "12:00".to_string(),
            fallback_illumination: 0.35,
            fallback_phase_name: "Waxing Crescent".to_string(),
            sun_fallback_degree: 15.0,
            orbs: AspectOrbs::default(),
        }
    }
}
