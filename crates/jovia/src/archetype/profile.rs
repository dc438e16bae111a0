use crate::archetype::axis::AxisInference;
use crate::archetype::scoring::ThemeScores;
use crate::archetype::tables::ThemeTables;
use crate::aspects::Aspect;
use serde::{Deserialize, Serialize};

/// Overall narrative tone of a chart, chosen from theme presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoryTone {
    #[serde(rename = "healing through hardship")]
    HealingThroughHardship,
    #[serde(rename = "natural expansion")]
    NaturalExpansion,
    #[serde(rename = "rebirth and evolution")]
    RebirthAndEvolution,
    #[serde(rename = "balanced growth")]
    BalancedGrowth,
}

impl StoryTone {
    /// First matching rule wins: challenge and healing together, then flow and growth
    /// together, then transformation alone.
    pub fn from_scores(scores: &ThemeScores) -> Self {
        if scores.contains("challenge") && scores.contains("healing") {
            StoryTone::HealingThroughHardship
        } else if scores.contains("flow") && scores.contains("growth") {
            StoryTone::NaturalExpansion
        } else if scores.contains("transformation") {
            StoryTone::RebirthAndEvolution
        } else {
            StoryTone::BalancedGrowth
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StoryTone::HealingThroughHardship => "healing through hardship",
            StoryTone::NaturalExpansion => "natural expansion",
            StoryTone::RebirthAndEvolution => "rebirth and evolution",
            StoryTone::BalancedGrowth => "balanced growth",
        }
    }
}

impl std::fmt::Display for StoryTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusRule {
    pub theme: String,
    pub phrase: String,
}

/// Rule list picking a "life focus" phrase from theme presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeFocus {
    pub rules: Vec<FocusRule>,
    pub default_phrase: String,
}

impl LifeFocus {
    /// Phrase of the first rule whose theme is present, else the default.
    pub fn phrase_for(&self, scores: &ThemeScores) -> &str {
        self.rules
            .iter()
            .find(|rule| scores.contains(&rule.theme))
            .map(|rule| rule.phrase.as_str())
            .unwrap_or(&self.default_phrase)
    }
}

impl Default for LifeFocus {
    fn default() -> Self {
        let rules = [
            ("healing", "Yaralarını bilgeliğe dönüştür."),
            ("transformation", "Derin dönüşümü kucakla."),
            ("growth", "Ufkunu genişletmeye odaklan."),
            ("challenge", "Zorluklardan güç devşir."),
            ("flow", "Doğal yeteneklerini paylaş."),
        ]
        .into_iter()
        .map(|(theme, phrase)| FocusRule {
            theme: theme.to_string(),
            phrase: phrase.to_string(),
        })
        .collect();

        Self {
            rules,
            default_phrase: "Odağını kalbin belirlesin.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorPattern {
    pub pattern: String,
    pub expression: String,
}

/// Patterns for the `limit` tightest aspects; equal orbs keep input order.
pub fn behavior_patterns(aspects: &[Aspect], tables: &ThemeTables, limit: usize) -> Vec<BehaviorPattern> {
    let mut tightest: Vec<&Aspect> = aspects.iter().collect();
    tightest.sort_by(|a, b| a.orb.total_cmp(&b.orb));

    tightest
        .into_iter()
        .filter_map(|aspect| {
            tables.aspect_theme(aspect.kind).map(|entry| BehaviorPattern {
                pattern: aspect.label(),
                expression: entry.expression.clone(),
            })
        })
        .take(limit)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeProfile {
    pub core_themes: Vec<String>,
    pub story_tone: StoryTone,
    pub dominant_axis: String,
    pub life_focus: String,
    pub behavior_patterns: Vec<BehaviorPattern>,
    /// "Mars Trine Jupiter" labels, one per aspect in detection order
    pub notable_aspects: Vec<String>,
}

impl ArchetypeProfile {
    pub fn build(
        scores: &ThemeScores,
        aspects: &[Aspect],
        axis: &AxisInference,
        tables: &ThemeTables,
        focus: &LifeFocus,
        max_patterns: usize,
    ) -> Self {
        Self {
            core_themes: scores.core_themes(),
            story_tone: StoryTone::from_scores(scores),
            dominant_axis: axis.dominant.clone(),
            life_focus: focus.phrase_for(scores).to_string(),
            behavior_patterns: behavior_patterns(aspects, tables, max_patterns),
            notable_aspects: aspects.iter().map(Aspect::label).collect(),
        }
    }
}
