//! Lookup tables that turn aspects and placements into themes.
//!
//! Everything here is plain configuration: built once (usually through `Default`), then
//! passed by reference into the scorer, the axis inferrer and the narrative composer.

use crate::aspects::AspectKind;
use serde::{Deserialize, Serialize};

/// Base theme and behavioral expression of an aspect kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectTheme {
    pub kind: AspectKind,
    pub theme: String,
    pub expression: String,
}

/// Theme attached to a single planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetTheme {
    pub planet: String,
    pub theme: String,
}

/// A theme receiving `factor` times the aspect weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeContribution {
    pub theme: String,
    pub factor: f64,
}

/// A planet pair whose aspects of the listed kinds add extra weighted themes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resonance {
    pub bodies: (String, String),
    pub kinds: Vec<AspectKind>,
    pub contributions: Vec<ThemeContribution>,
}

impl Resonance {
    pub fn matches(&self, body_a: &str, body_b: &str, kind: AspectKind) -> bool {
        pair_matches(&self.bodies, body_a, body_b) && self.kinds.contains(&kind)
    }
}

/// Case-insensitive, order-insensitive pair comparison.
pub(crate) fn pair_matches(pair: &(String, String), body_a: &str, body_b: &str) -> bool {
    (pair.0.eq_ignore_ascii_case(body_a) && pair.1.eq_ignore_ascii_case(body_b))
        || (pair.0.eq_ignore_ascii_case(body_b) && pair.1.eq_ignore_ascii_case(body_a))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeTables {
    pub aspect_themes: Vec<AspectTheme>,
    /// Themes added whenever the planet takes part in an aspect
    pub special_planets: Vec<PlanetTheme>,
    /// Themes added for the planet's mere placement in the chart
    pub broad_planets: Vec<PlanetTheme>,
    pub resonances: Vec<Resonance>,
    /// Score added per broad-planet placement
    pub placement_weight: f64,
}

impl ThemeTables {
    pub fn aspect_theme(&self, kind: AspectKind) -> Option<&AspectTheme> {
        self.aspect_themes.iter().find(|entry| entry.kind == kind)
    }

    pub fn special_theme(&self, planet: &str) -> Option<&str> {
        lookup(&self.special_planets, planet)
    }

    pub fn broad_theme(&self, planet: &str) -> Option<&str> {
        lookup(&self.broad_planets, planet)
    }

    /// Resonances matching a pair and kind, in table order.
    pub fn resonances_for<'a>(
        &'a self,
        body_a: &'a str,
        body_b: &'a str,
        kind: AspectKind,
    ) -> impl Iterator<Item = &'a Resonance> + 'a {
        self.resonances
            .iter()
            .filter(move |r| r.matches(body_a, body_b, kind))
    }
}

fn lookup<'a>(table: &'a [PlanetTheme], planet: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|entry| entry.planet.eq_ignore_ascii_case(planet))
        .map(|entry| entry.theme.as_str())
}

fn planet(planet: &str, theme: &str) -> PlanetTheme {
    PlanetTheme {
        planet: planet.to_string(),
        theme: theme.to_string(),
    }
}

fn resonance(a: &str, b: &str, kinds: &[AspectKind], contributions: &[(&str, f64)]) -> Resonance {
    Resonance {
        bodies: (a.to_string(), b.to_string()),
        kinds: kinds.to_vec(),
        contributions: contributions
            .iter()
            .map(|(theme, factor)| ThemeContribution {
                theme: theme.to_string(),
                factor: *factor,
            })
            .collect(),
    }
}

impl Default for ThemeTables {
    fn default() -> Self {
        use AspectKind::*;

        let aspect_themes = [
            (Conjunction, "fusion", "merges two drives into one focused impulse"),
            (Sextile, "opportunity", "opens doors when effort meets a chance"),
            (Square, "challenge", "grows through friction and decisive action"),
            (Trine, "flow", "moves with natural ease and talent"),
            (Opposition, "balance", "learns by mirroring others and seeking the middle"),
        ]
        .into_iter()
        .map(|(kind, theme, expression)| AspectTheme {
            kind,
            theme: theme.to_string(),
            expression: expression.to_string(),
        })
        .collect();

        Self {
            aspect_themes,
            special_planets: vec![
                planet("Chiron", "healing"),
                planet("Saturn", "responsibility"),
                planet("Moon", "emotion"),
                planet("Pluto", "transformation"),
            ],
            broad_planets: vec![
                planet("Jupiter", "growth"),
                planet("Mars", "action"),
                planet("Venus", "love"),
                planet("Neptune", "intuition"),
            ],
            resonances: vec![
                resonance("Mars", "Jupiter", &[Trine, Sextile], &[("growth", 0.6), ("action", 0.3)]),
                resonance(
                    "Sun",
                    "Saturn",
                    &[Square, Opposition, Conjunction],
                    &[("challenge", 0.5), ("structure", 0.3)],
                ),
                resonance(
                    "Moon",
                    "Neptune",
                    &[Conjunction, Trine, Sextile],
                    &[("intuition", 0.5), ("compassion", 0.3)],
                ),
                resonance(
                    "Moon",
                    "Neptune",
                    &[Square, Opposition],
                    &[("service", 0.4), ("compassion", 0.3)],
                ),
                resonance(
                    "Venus",
                    "Pluto",
                    &[Conjunction, Square, Opposition],
                    &[("depth", 0.5), ("transformation", 0.3)],
                ),
                resonance("Venus", "Pluto", &[Trine, Sextile], &[("value", 0.4), ("depth", 0.3)]),
                resonance(
                    "Mercury",
                    "Uranus",
                    &[Conjunction, Sextile, Square, Trine, Opposition],
                    &[("innovation", 0.5), ("growth", 0.2)],
                ),
                resonance(
                    "Sun",
                    "Moon",
                    &[Conjunction, Square, Opposition],
                    &[("integration", 0.5), ("security", 0.3)],
                ),
                resonance("Sun", "Moon", &[Trine, Sextile], &[("security", 0.4), ("integration", 0.3)]),
            ],
            placement_weight: 0.5,
        }
    }
}
