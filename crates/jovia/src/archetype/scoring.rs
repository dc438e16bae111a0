use crate::archetype::tables::ThemeTables;
use crate::aspects::Aspect;
use crate::placement::PlacedPlanet;
use serde::{Deserialize, Serialize};

/// Weight floor: no aspect contributes nothing
const MIN_ASPECT_WEIGHT: f64 = 0.1;
/// Orb at which an aspect's weight reaches the floor
const WEIGHT_ORB_SPAN: f64 = 12.0;

/// Orb-proportional weight: 1.0 for an exact aspect, falling linearly to 0.1 at 12°.
pub fn aspect_weight(orb: f64) -> f64 {
    (1.0 - orb / WEIGHT_ORB_SPAN).max(MIN_ASPECT_WEIGHT)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeScore {
    pub theme: String,
    pub score: f64,
}

/// Accumulated theme weights, kept in order of each theme's first contribution.
///
/// Contributions are summed in the order they are added, so the same inputs always produce
/// bit-identical scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeScores {
    entries: Vec<ThemeScore>,
}

impl ThemeScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, theme: &str, weight: f64) {
        match self.entries.iter_mut().find(|entry| entry.theme == theme) {
            Some(entry) => entry.score += weight,
            None => self.entries.push(ThemeScore {
                theme: theme.to_string(),
                score: weight,
            }),
        }
    }

    /// Score of a theme, 0.0 when absent.
    pub fn get(&self, theme: &str) -> f64 {
        self.entries
            .iter()
            .find(|entry| entry.theme == theme)
            .map(|entry| entry.score)
            .unwrap_or(0.0)
    }

    pub fn contains(&self, theme: &str) -> bool {
        self.entries.iter().any(|entry| entry.theme == theme)
    }

    /// Unique themes in order of first occurrence.
    pub fn core_themes(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.theme.clone()).collect()
    }

    /// Themes by descending score; equal scores keep first-occurrence order.
    pub fn ranked(&self) -> Vec<&ThemeScore> {
        let mut ranked: Vec<&ThemeScore> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThemeScore> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, f64)> for ThemeScores {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        let mut scores = ThemeScores::new();
        for (theme, weight) in iter {
            scores.add(theme, weight);
        }
        scores
    }
}

/// Scores psychological themes from aspects and placements.
#[derive(Debug, Clone, Default)]
pub struct ThemeScorer {
    tables: ThemeTables,
}

impl ThemeScorer {
    pub fn new(tables: ThemeTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ThemeTables {
        &self.tables
    }

    /// Score all aspects (in order), then all placements (in order).
    ///
    /// Per aspect with weight `w`: the aspect kind's theme gets `w`, each special planet in
    /// the pair gets `w`, and each matching resonance adds `factor * w` per contribution.
    /// Per placement of a broad planet: its theme gets the configured placement weight.
    pub fn score(&self, aspects: &[Aspect], placements: &[PlacedPlanet]) -> ThemeScores {
        let mut scores = ThemeScores::new();

        for aspect in aspects {
            let weight = aspect_weight(aspect.orb);

            if let Some(entry) = self.tables.aspect_theme(aspect.kind) {
                scores.add(&entry.theme, weight);
            }
            for body in [&aspect.body_a, &aspect.body_b] {
                if let Some(theme) = self.tables.special_theme(body) {
                    scores.add(theme, weight);
                }
            }
            for resonance in self
                .tables
                .resonances_for(&aspect.body_a, &aspect.body_b, aspect.kind)
            {
                for contribution in &resonance.contributions {
                    scores.add(&contribution.theme, contribution.factor * weight);
                }
            }
        }

        for placement in placements {
            if let Some(theme) = self.tables.broad_theme(placement.name()) {
                scores.add(theme, self.tables.placement_weight);
            }
        }

        scores
    }
}
