//! Theme scoring, axis inference and the archetype profile built from them.

pub mod axis;
pub mod profile;
pub mod scoring;
pub mod tables;

pub use axis::{AxisDefinition, AxisInference, AxisInferrer, AxisScore, AxisTable, FallbackRule, InferenceBasis};
pub use profile::{behavior_patterns, ArchetypeProfile, BehaviorPattern, FocusRule, LifeFocus, StoryTone};
pub use scoring::{aspect_weight, ThemeScore, ThemeScorer, ThemeScores};
pub use tables::{AspectTheme, PlanetTheme, Resonance, ThemeContribution, ThemeTables};
