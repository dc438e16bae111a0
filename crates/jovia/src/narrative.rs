//! Structured narrative payload handed to a text generator.
//!
//! Composition is pure assembly over a finished chart: no text is generated here.

use crate::archetype::{AxisInference, LifeFocus, ThemeScore, ThemeScores};
use crate::aspects::{Aspect, AspectKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const CONFIDENCE_FLOOR: f64 = 0.2;
const CONFIDENCE_CEILING: f64 = 0.95;
/// Number of leading themes summed into the confidence value
const CONFIDENCE_THEMES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeSettings {
    pub top_themes: usize,
    pub max_derived: usize,
    pub max_behavior_patterns: usize,
    pub focus: LifeFocus,
}

impl Default for NarrativeSettings {
    fn default() -> Self {
        Self {
            top_themes: 8,
            max_derived: 12,
            max_behavior_patterns: 5,
            focus: LifeFocus::default(),
        }
    }
}

/// Which ranked axis the narrative is written around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeStrategy {
    #[default]
    Dominant,
    /// The runner-up axis; falls back to the dominant one when there is none
    Alternate,
}

impl FromStr for NarrativeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dominant" => Ok(NarrativeStrategy::Dominant),
            "alternate" => Ok(NarrativeStrategy::Alternate),
            other => Err(format!("unknown narrative strategy '{}' (dominant, alternate)", other)),
        }
    }
}

/// One aspect the narrative is derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectProvenance {
    /// "Mars–Jupiter"
    pub pair: String,
    pub aspect: AspectKind,
    /// Rounded to two decimals
    pub orb: f64,
}

impl AspectProvenance {
    pub fn from_aspect(aspect: &Aspect) -> Self {
        Self {
            pair: format!("{}–{}", aspect.body_a, aspect.body_b),
            aspect: aspect.kind,
            orb: (aspect.orb * 100.0).round() / 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativePayload {
    pub axis: String,
    pub themes: Vec<ThemeScore>,
    pub focus: String,
    pub derived_from: Vec<AspectProvenance>,
    pub confidence: Option<f64>,
    pub strategy: NarrativeStrategy,
}

#[derive(Debug, Clone, Default)]
pub struct NarrativeComposer {
    settings: NarrativeSettings,
}

impl NarrativeComposer {
    pub fn new(settings: NarrativeSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &NarrativeSettings {
        &self.settings
    }

    pub fn compose(
        &self,
        axis: &AxisInference,
        scores: &ThemeScores,
        aspects: &[Aspect],
        strategy: NarrativeStrategy,
    ) -> NarrativePayload {
        let axis = match strategy {
            NarrativeStrategy::Dominant => axis.dominant.clone(),
            NarrativeStrategy::Alternate => axis
                .runner_up
                .clone()
                .unwrap_or_else(|| axis.dominant.clone()),
        };

        let ranked = scores.ranked();
        let themes = ranked
            .iter()
            .take(self.settings.top_themes)
            .map(|score| (*score).clone())
            .collect();

        NarrativePayload {
            axis,
            themes,
            focus: self.settings.focus.phrase_for(scores).to_string(),
            derived_from: self.provenance(aspects),
            confidence: confidence(&ranked),
            strategy,
        }
    }

    /// Tightest aspects first, capped at the configured maximum.
    fn provenance(&self, aspects: &[Aspect]) -> Vec<AspectProvenance> {
        let mut tightest: Vec<&Aspect> = aspects.iter().collect();
        tightest.sort_by(|a, b| a.orb.total_cmp(&b.orb));
        tightest
            .into_iter()
            .take(self.settings.max_derived)
            .map(AspectProvenance::from_aspect)
            .collect()
    }
}

fn confidence(ranked: &[&ThemeScore]) -> Option<f64> {
    if ranked.is_empty() {
        return None;
    }
    let top: f64 = ranked.iter().take(CONFIDENCE_THEMES).map(|s| s.score).sum();
    Some(top.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING))
}
