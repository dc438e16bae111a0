//! Jovia: natal chart engine.
//!
//! Turns ephemeris output into placed planets, aspects, weighted psychological themes, a
//! dominant life axis and a structured narrative payload. Ephemeris data, geocoding and
//! text generation come from collaborators behind traits.

pub mod archetype;
pub mod aspects;
pub mod chart;
pub mod degrees;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod narrative;
pub mod placement;
pub mod providers;
pub mod zodiac;

pub use archetype::{ArchetypeProfile, AxisInference, AxisInferrer, StoryTone, ThemeScorer, ThemeScores, ThemeTables};
pub use aspects::{compute_synastry_aspects, Aspect, AspectDetector, AspectKind, OrbTable};
pub use chart::{compute_chart, Chart, ChartEngine, EngineConfig};
pub use degrees::{normalize_degrees, SignPosition};
pub use ephemeris::{EphemerisError, EphemerisProvider, HouseSystem, PlanetPosition, SnapshotEphemeris};
pub use error::ChartError;
pub use houses::{resolve_house, HouseCusps};
pub use narrative::{NarrativeComposer, NarrativePayload, NarrativeSettings, NarrativeStrategy};
pub use placement::PlacedPlanet;
pub use providers::{
    GenerationError, GeocodeError, GeocodeProvider, Interpretation, Location, PromptTemplate,
    TextGenerationProvider,
};
pub use zodiac::ZodiacSign;
