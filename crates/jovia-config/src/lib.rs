use jovia::aspects::OrbTable;
use jovia::EngineConfig;
use log::{debug, info};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "JOVIA_CONFIG";

/// Relative locations tried when no path is given: the workspace root, then two levels up
/// for binaries run from their own crate directory.
const DEFAULT_PATHS: [&str; 2] = ["configs/engine.toml", "../../configs/engine.toml"];

/// A named place the CLI geocoder can resolve offline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceEntry {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

#[derive(Debug, Clone, Default)]
pub struct JoviaSettings {
    pub engine: EngineConfig,
    pub places: Vec<PlaceEntry>,
    /// File the settings were read from; None when running on defaults
    pub source: Option<PathBuf>,
}

impl JoviaSettings {
    /// Case-insensitive lookup in the place book.
    pub fn place(&self, name: &str) -> Option<&PlaceEntry> {
        let wanted = name.trim();
        self.places
            .iter()
            .find(|place| place.name.eq_ignore_ascii_case(wanted))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OrbsToml {
    #[serde(default)]
    natal: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    synastry: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScoringToml {
    #[serde(default)]
    placement_weight: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NarrativeToml {
    #[serde(default)]
    top_themes: Option<usize>,
    #[serde(default)]
    max_derived: Option<usize>,
    #[serde(default)]
    max_behavior_patterns: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RootConfigToml {
    #[serde(default)]
    orbs: OrbsToml,
    #[serde(default)]
    scoring: ScoringToml,
    #[serde(default)]
    narrative: NarrativeToml,
    #[serde(default)]
    places: Vec<PlaceEntry>,
}

/// Locate and read the config text.
///
/// An explicit path, then `JOVIA_CONFIG`, must exist. Otherwise the common relative paths are
/// tried and `Ok(None)` means none of them was found.
pub fn read_engine_toml_text(explicit: Option<&Path>) -> anyhow::Result<Option<(PathBuf, String)>> {
    let chosen = explicit
        .map(Path::to_path_buf)
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));

    if let Some(path) = chosen {
        let text = fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Could not read config {}: {e}", path.display()))?;
        return Ok(Some((path, text)));
    }

    for p in &DEFAULT_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), text)));
        }
    }
    Ok(None)
}

/// Parse config text, filling every omitted value from the engine defaults.
pub fn parse_settings(text: &str) -> anyhow::Result<JoviaSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse engine.toml: {e}"))?;

    let mut engine = EngineConfig::default();

    if let Some(natal) = &root.orbs.natal {
        engine.natal_orbs = OrbTable::from_named(natal)
            .map_err(|e| anyhow::anyhow!("[orbs.natal]: {e}"))?;
    }
    if let Some(synastry) = &root.orbs.synastry {
        engine.synastry_orbs = OrbTable::from_named(synastry)
            .map_err(|e| anyhow::anyhow!("[orbs.synastry]: {e}"))?;
    }

    if let Some(weight) = root.scoring.placement_weight {
        if !weight.is_finite() || weight < 0.0 {
            anyhow::bail!("scoring.placement_weight must be a non-negative number, got {weight}");
        }
        engine.theme_tables.placement_weight = weight;
    }

    let narrative = &mut engine.narrative;
    if let Some(n) = root.narrative.top_themes {
        narrative.top_themes = n;
    }
    if let Some(n) = root.narrative.max_derived {
        narrative.max_derived = n;
    }
    if let Some(n) = root.narrative.max_behavior_patterns {
        narrative.max_behavior_patterns = n;
    }

    for place in &root.places {
        if !(-90.0..=90.0).contains(&place.latitude) || !(-180.0..=180.0).contains(&place.longitude) {
            anyhow::bail!(
                "place '{}' has out-of-range coordinates ({}, {})",
                place.name,
                place.latitude,
                place.longitude
            );
        }
    }

    Ok(JoviaSettings {
        engine,
        places: root.places,
        source: None,
    })
}

/// Load settings from an explicit path, `JOVIA_CONFIG`, or the default locations.
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<JoviaSettings> {
    match read_engine_toml_text(explicit)? {
        Some((path, text)) => {
            let mut settings = parse_settings(&text)
                .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
            debug!(
                "Loaded {} ({} places)",
                path.display(),
                settings.places.len()
            );
            settings.source = Some(path);
            Ok(settings)
        }
        None => {
            info!("No engine.toml found in {:?}; using defaults", DEFAULT_PATHS);
            Ok(JoviaSettings::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jovia::AspectKind;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings.engine, EngineConfig::default());
        assert!(settings.places.is_empty());
    }

    #[test]
    fn test_orb_override() {
        let text = r#"
            [orbs.synastry]
            conjunction = 10
            sextile = 3
            square = 5
            trine = 5
            opposition = 10
        "#;
        let settings = parse_settings(text).unwrap();
        assert_eq!(settings.engine.synastry_orbs.orb(AspectKind::Sextile), 3.0);
        assert_eq!(settings.engine.natal_orbs, OrbTable::natal());
    }

    #[test]
    fn test_incomplete_orb_section_rejected() {
        let text = "[orbs.natal]\nconjunction = 8\nsquare = 6\n";
        let err = parse_settings(text).unwrap_err().to_string();
        assert!(err.contains("orbs.natal"), "{err}");
        assert!(err.contains("sextile"), "{err}");
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(parse_settings("[layout]\nrows = 3\n").is_err());
    }

    #[test]
    fn test_narrative_and_scoring() {
        let text = "[scoring]\nplacement_weight = 0.75\n[narrative]\ntop_themes = 4\n";
        let settings = parse_settings(text).unwrap();
        assert_eq!(settings.engine.theme_tables.placement_weight, 0.75);
        assert_eq!(settings.engine.narrative.top_themes, 4);
        assert_eq!(settings.engine.narrative.max_derived, 12);
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[[places]]\nname = \"Istanbul\"\nlatitude = 41.0082\nlongitude = 28.9784\ntimezone = \"Europe/Istanbul\""
        )
        .unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.source.as_deref(), Some(path.as_path()));
        let place = settings.place("  istanbul ").unwrap();
        assert_eq!(place.timezone, "Europe/Istanbul");
        assert!(settings.place("Ankara").is_none());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_settings(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_out_of_range_place_rejected() {
        let text = "[[places]]\nname = \"Nowhere\"\nlatitude = 95.0\nlongitude = 0.0\ntimezone = \"UTC\"\n";
        assert!(parse_settings(text).is_err());
    }

    #[test]
    fn test_shipped_config_parses() {
        let text = include_str!("../../../configs/engine.toml");
        let settings = parse_settings(text).unwrap();
        assert_eq!(settings.engine, EngineConfig::default());
        assert!(settings.place("New York").is_some());
    }
}
