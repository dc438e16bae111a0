//! Life-axis inference.
//!
//! Each candidate axis is a paired sign polarity scored as a linear combination of theme
//! scores, plus flat bonuses for particular planet-pair aspects.

use crate::archetype::scoring::ThemeScores;
use crate::archetype::tables::{pair_matches, ThemeContribution};
use crate::aspects::Aspect;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDefinition {
    pub label: String,
    pub weights: Vec<ThemeContribution>,
    /// Planet pairs whose presence in any aspect adds the flat bonus once
    pub bonus_pairs: Vec<(String, String)>,
}

/// Theme-presence rule used when there are no aspects at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackRule {
    pub theme: String,
    pub axis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTable {
    /// Declaration order doubles as the tie-break order
    pub axes: Vec<AxisDefinition>,
    pub pair_bonus: f64,
    pub fallback_rules: Vec<FallbackRule>,
    pub fallback_axis: String,
}

fn axis(label: &str, weights: &[(&str, f64)], bonus_pairs: &[(&str, &str)]) -> AxisDefinition {
    AxisDefinition {
        label: label.to_string(),
        weights: weights
            .iter()
            .map(|(theme, factor)| ThemeContribution {
                theme: theme.to_string(),
                factor: *factor,
            })
            .collect(),
        bonus_pairs: bonus_pairs
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect(),
    }
}

impl Default for AxisTable {
    fn default() -> Self {
        Self {
            axes: vec![
                axis(
                    "Yay–İkizler",
                    &[("growth", 1.0), ("intuition", 0.2), ("innovation", 0.15)],
                    &[("Mars", "Jupiter")],
                ),
                axis(
                    "Yengeç–Oğlak",
                    &[("security", 1.0), ("structure", 0.2), ("integration", 0.1)],
                    &[("Sun", "Saturn"), ("Moon", "Saturn")],
                ),
                axis(
                    "Terazi–Koç",
                    &[("balance", 1.0), ("action", 0.1), ("love", 0.1)],
                    &[("Venus", "Mars")],
                ),
                axis(
                    "Boğa–Akrep",
                    &[("value", 1.0), ("depth", 0.2), ("transformation", 0.1)],
                    &[("Venus", "Pluto")],
                ),
                axis(
                    "Başak–Balık",
                    &[("service", 1.0), ("intuition", 0.2), ("compassion", 0.1)],
                    &[("Moon", "Neptune")],
                ),
            ],
            pair_bonus: 0.12,
            fallback_rules: vec![
                FallbackRule {
                    theme: "transformation".to_string(),
                    axis: "Akrep–Boğa".to_string(),
                },
                FallbackRule {
                    theme: "healing".to_string(),
                    axis: "Balık–Başak".to_string(),
                },
                FallbackRule {
                    theme: "growth".to_string(),
                    axis: "Yay–İkizler".to_string(),
                },
            ],
            fallback_axis: "Kova–Aslan".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisScore {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferenceBasis {
    /// Ranked by weighted theme scores and pair bonuses
    Weighted,
    /// No aspects: chosen from theme presence alone
    ThemeFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisInference {
    pub dominant: String,
    pub runner_up: Option<String>,
    /// Every candidate, best first; empty for the fallback
    pub ranking: Vec<AxisScore>,
    pub basis: InferenceBasis,
}

#[derive(Debug, Clone, Default)]
pub struct AxisInferrer {
    table: AxisTable,
}

impl AxisInferrer {
    pub fn new(table: AxisTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &AxisTable {
        &self.table
    }

    pub fn infer(&self, scores: &ThemeScores, aspects: &[Aspect]) -> AxisInference {
        if aspects.is_empty() || self.table.axes.is_empty() {
            return self.fallback(scores);
        }

        let mut ranking: Vec<AxisScore> = self
            .table
            .axes
            .iter()
            .map(|axis| AxisScore {
                label: axis.label.clone(),
                score: self.axis_score(axis, scores, aspects),
            })
            .collect();
        // Stable: ties keep declaration order
        ranking.sort_by(|a, b| b.score.total_cmp(&a.score));

        let dominant = ranking[0].label.clone();
        let runner_up = ranking.get(1).map(|s| s.label.clone());
        debug!("dominant axis {} (runner-up {:?})", dominant, runner_up);

        AxisInference {
            dominant,
            runner_up,
            ranking,
            basis: InferenceBasis::Weighted,
        }
    }

    fn axis_score(&self, axis: &AxisDefinition, scores: &ThemeScores, aspects: &[Aspect]) -> f64 {
        let weighted: f64 = axis
            .weights
            .iter()
            .map(|w| w.factor * scores.get(&w.theme))
            .sum();
        let bonuses = axis
            .bonus_pairs
            .iter()
            .filter(|pair| {
                aspects
                    .iter()
                    .any(|aspect| pair_matches(pair, &aspect.body_a, &aspect.body_b))
            })
            .count();
        weighted + bonuses as f64 * self.table.pair_bonus
    }

    fn fallback(&self, scores: &ThemeScores) -> AxisInference {
        let dominant = self
            .table
            .fallback_rules
            .iter()
            .find(|rule| scores.contains(&rule.theme))
            .map(|rule| rule.axis.clone())
            .unwrap_or_else(|| self.table.fallback_axis.clone());

        AxisInference {
            dominant,
            runner_up: None,
            ranking: Vec::new(),
            basis: InferenceBasis::ThemeFallback,
        }
    }
}
