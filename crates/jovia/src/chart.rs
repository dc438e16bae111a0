//! Chart assembly: ephemeris data in, placed planets, aspects and archetype out.

use crate::archetype::{
    ArchetypeProfile, AxisInference, AxisInferrer, AxisTable, ThemeScorer, ThemeScores, ThemeTables,
};
use crate::aspects::{Aspect, AspectDetector, OrbTable};
use crate::degrees::checked_finite;
use crate::ephemeris::{EphemerisProvider, HouseFrame, HouseSystem, PlanetPosition};
use crate::error::ChartError;
use crate::narrative::{NarrativeComposer, NarrativePayload, NarrativeSettings, NarrativeStrategy};
use crate::placement::{place_all, PlacedPlanet};
use log::debug;
use serde::Serialize;

/// All tunable policy of the engine. Built once and shared by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub natal_orbs: OrbTable,
    pub synastry_orbs: OrbTable,
    pub theme_tables: ThemeTables,
    pub axis_table: AxisTable,
    pub narrative: NarrativeSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            natal_orbs: OrbTable::natal(),
            synastry_orbs: OrbTable::synastry(),
            theme_tables: ThemeTables::default(),
            axis_table: AxisTable::default(),
            narrative: NarrativeSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub julian_day: f64,
    pub planets: Vec<PlacedPlanet>,
    pub houses: HouseFrame,
    pub aspects: Vec<Aspect>,
    pub themes: ThemeScores,
    pub axis: AxisInference,
    pub archetype: ArchetypeProfile,
}

impl Chart {
    pub fn planet(&self, name: &str) -> Option<&PlacedPlanet> {
        self.planets
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

pub struct ChartEngine<E> {
    ephemeris: E,
    natal: AspectDetector,
    synastry: AspectDetector,
    scorer: ThemeScorer,
    inferrer: AxisInferrer,
    composer: NarrativeComposer,
}

impl<E: EphemerisProvider> ChartEngine<E> {
    pub fn new(ephemeris: E) -> Self {
        Self::with_config(ephemeris, EngineConfig::default())
    }

    pub fn with_config(ephemeris: E, config: EngineConfig) -> Self {
        Self {
            ephemeris,
            natal: AspectDetector::new(config.natal_orbs),
            synastry: AspectDetector::new(config.synastry_orbs),
            scorer: ThemeScorer::new(config.theme_tables),
            inferrer: AxisInferrer::new(config.axis_table),
            composer: NarrativeComposer::new(config.narrative),
        }
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    pub fn compute_chart(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<Chart, ChartError> {
        checked_finite(julian_day, "julian day")?;
        checked_finite(latitude, "latitude")?;
        checked_finite(longitude, "longitude")?;

        let positions = self.ephemeris.positions_at(julian_day)?;
        let houses = self
            .ephemeris
            .houses_at(julian_day, latitude, longitude, system)?;

        let planets = place_all(&positions, Some(&houses.cusps))?;
        let aspects = self.natal.natal_aspects(&positions)?;
        let themes = self.scorer.score(&aspects, &planets);
        let axis = self.inferrer.infer(&themes, &aspects);

        let settings = self.composer.settings();
        let archetype = ArchetypeProfile::build(
            &themes,
            &aspects,
            &axis,
            self.scorer.tables(),
            &settings.focus,
            settings.max_behavior_patterns,
        );

        debug!(
            "chart at JD {}: {} planets, {} aspects, {} themes, axis {}",
            julian_day,
            planets.len(),
            aspects.len(),
            themes.len(),
            axis.dominant
        );

        Ok(Chart {
            julian_day,
            planets,
            houses,
            aspects,
            themes,
            axis,
            archetype,
        })
    }

    pub fn compose_narrative(&self, chart: &Chart, strategy: NarrativeStrategy) -> NarrativePayload {
        self.composer
            .compose(&chart.axis, &chart.themes, &chart.aspects, strategy)
    }

    /// Cross-chart aspects using the configured synastry orbs.
    pub fn synastry(
        &self,
        first: &[PlanetPosition],
        second: &[PlanetPosition],
    ) -> Result<Vec<Aspect>, ChartError> {
        self.synastry.synastry_aspects(first, second)
    }
}

/// Compute a chart with the default engine configuration.
pub fn compute_chart<E: EphemerisProvider>(
    ephemeris: &E,
    julian_day: f64,
    latitude: f64,
    longitude: f64,
    system: HouseSystem,
) -> Result<Chart, ChartError> {
    ChartEngine::new(ephemeris).compute_chart(julian_day, latitude, longitude, system)
}
