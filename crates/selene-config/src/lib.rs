use anyhow::Context;
use selene::chart::birth::parse_birth_time;
use selene::retrograde::MAX_WINDOW_HOURS;
use selene::EngineSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Relative locations tried when no explicit path is given
const SEARCH_PATHS: [&str; 2] = ["configs/selene.toml", "../../configs/selene.toml"];

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    engine: Option<EngineSettings>,
}

/// Try common relative paths for `configs/selene.toml`.
/// Returns the path that was read along with its text.
pub fn read_config_text() -> Option<(PathBuf, String)> {
    SEARCH_PATHS.iter().find_map(|p| {
        fs::read_to_string(p)
            .ok()
            .map(|text| (PathBuf::from(p), text))
    })
}

/// Parse settings from TOML text. A missing `[engine]` table means defaults.
pub fn parse_engine_settings(text: &str) -> anyhow::Result<EngineSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse selene.toml: {e}"))?;
    let settings = root.engine.unwrap_or_default();
    validate_settings(&settings)?;
    Ok(settings)
}

/// Load engine settings.
///
/// With an explicit `path` the file must exist. Without one, the search
/// paths are tried and defaults are used when none of them exists.
pub fn load_engine_settings(path: Option<&Path>) -> anyhow::Result<EngineSettings> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Could not read config file {}", path.display()))?;
            parse_engine_settings(&text)
                .with_context(|| format!("Invalid config file {}", path.display()))
        }
        None => match read_config_text() {
            Some((found, text)) => parse_engine_settings(&text)
                .with_context(|| format!("Invalid config file {}", found.display())),
            None => Ok(EngineSettings::default()),
        },
    }
}

pub fn validate_settings(settings: &EngineSettings) -> anyhow::Result<()> {
    let window = settings.retrograde_window_hours;
    if !window.is_finite() || window <= 0.0 || window > MAX_WINDOW_HOURS {
        anyhow::bail!(
            "engine.retrograde_window_hours must be within (0, {MAX_WINDOW_HOURS}], got {window}"
        );
    }
    let illumination = settings.fallback_illumination;
    if !(0.0..=1.0).contains(&illumination) {
        anyhow::bail!("engine.fallback_illumination must be within 0..=1, got {illumination}");
    }
    parse_birth_time(&settings.default_birth_time)
        .with_context(|| "engine.default_birth_time is not a valid time".to_string())?;
    if settings.fallback_phase_name.trim().is_empty() {
        anyhow::bail!("engine.fallback_phase_name must not be empty");
    }
    let degree = settings.sun_fallback_degree;
    if !(0.0..30.0).contains(&degree) {
        anyhow::bail!("engine.sun_fallback_degree must be within 0..30, got {degree}");
    }
    let orbs = &settings.orbs;
    for (name, orb) in [
        ("conjunction", orbs.conjunction),
        ("opposition", orbs.opposition),
        ("trine", orbs.trine),
        ("square", orbs.square),
        ("sextile", orbs.sextile),
    ] {
        if !orb.is_finite() || orb < 0.0 {
            anyhow::bail!("engine.orbs.{name} must not be negative, got {orb}");
        }
    }
    Ok(())
}
