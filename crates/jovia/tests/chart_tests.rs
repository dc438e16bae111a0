use async_trait::async_trait;
use jovia::archetype::InferenceBasis;
use jovia::ephemeris::EphemerisError;
use jovia::providers::{
    GenerationError, GeocodeError, GeocodeProvider, Interpretation, Location, PromptTemplate,
    TextGenerationProvider,
};
use jovia::{
    compute_chart, AspectKind, ChartEngine, ChartError, EngineConfig, HouseSystem, NarrativePayload,
    NarrativeStrategy, SnapshotEphemeris, StoryTone, ZodiacSign,
};
use std::path::PathBuf;

const NATAL_JD: f64 = 2447892.5;
const ISTANBUL: (f64, f64) = (41.0082, 28.9784);

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn natal_snapshot() -> SnapshotEphemeris {
    SnapshotEphemeris::from_path(&fixture("natal_snapshot.json")).unwrap()
}

#[test]
fn test_chart_from_snapshot() {
    let snapshot = natal_snapshot();
    let chart = compute_chart(&snapshot, NATAL_JD, ISTANBUL.0, ISTANBUL.1, HouseSystem::Equal).unwrap();

    assert_eq!(chart.planets.len(), 5);
    let houses: Vec<(&str, Option<u8>)> = chart.planets.iter().map(|p| (p.name(), p.house)).collect();
    assert_eq!(
        houses,
        vec![
            ("Sun", Some(1)),
            ("Moon", Some(7)),
            ("Mars", Some(2)),
            ("Jupiter", Some(6)),
            ("Saturn", Some(4)),
        ]
    );

    let moon = chart.planet("moon").unwrap();
    assert_eq!(moon.sign.sign, ZodiacSign::Libra);
    assert_eq!(moon.sign.degree, 25);

    let labels: Vec<String> = chart.aspects.iter().map(|a| a.label()).collect();
    assert_eq!(labels, vec!["Jupiter Trine Mars", "Saturn Square Sun"]);
}

#[test]
fn test_chart_archetype() {
    let snapshot = natal_snapshot();
    let chart = compute_chart(&snapshot, NATAL_JD, ISTANBUL.0, ISTANBUL.1, HouseSystem::Equal).unwrap();

    assert_eq!(
        chart.archetype.core_themes,
        vec!["flow", "growth", "action", "challenge", "responsibility", "structure"]
    );
    assert!((chart.themes.get("growth") - 1.1).abs() < 1e-9);
    assert!((chart.themes.get("challenge") - 1.5).abs() < 1e-9);
    assert!((chart.themes.get("action") - 0.8).abs() < 1e-9);

    assert_eq!(chart.axis.basis, InferenceBasis::Weighted);
    assert_eq!(chart.axis.dominant, "Yay–İkizler");
    assert_eq!(chart.axis.runner_up.as_deref(), Some("Yengeç–Oğlak"));
    assert!((chart.axis.ranking[0].score - 1.22).abs() < 1e-9);

    let archetype = &chart.archetype;
    assert_eq!(archetype.dominant_axis, "Yay–İkizler");
    assert_eq!(archetype.story_tone, StoryTone::NaturalExpansion);
    assert_eq!(archetype.life_focus, "Ufkunu genişletmeye odaklan.");
    assert_eq!(archetype.notable_aspects, vec!["Jupiter Trine Mars", "Saturn Square Sun"]);
    assert_eq!(archetype.behavior_patterns.len(), 2);
    assert_eq!(archetype.behavior_patterns[1].pattern, "Saturn Square Sun");
}

#[test]
fn test_chart_is_reproducible() {
    let snapshot = natal_snapshot();
    let first = compute_chart(&snapshot, NATAL_JD, ISTANBUL.0, ISTANBUL.1, HouseSystem::Equal).unwrap();
    let second = compute_chart(&snapshot, NATAL_JD, ISTANBUL.0, ISTANBUL.1, HouseSystem::Equal).unwrap();

    assert_eq!(first.themes, second.themes);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_chart_json_shape() {
    let snapshot = natal_snapshot();
    let chart = compute_chart(&snapshot, NATAL_JD, ISTANBUL.0, ISTANBUL.1, HouseSystem::Equal).unwrap();
    let json = serde_json::to_value(&chart).unwrap();

    assert_eq!(json["planets"][0]["name"], "Sun");
    assert_eq!(json["planets"][0]["longitude"], 10.0);
    assert_eq!(json["planets"][0]["sign"]["sign"], "aries");
    assert_eq!(json["aspects"][1]["type"], "square");
    assert_eq!(json["archetype"]["storyTone"], "natural expansion");
    assert_eq!(json["archetype"]["dominantAxis"], "Yay–İkizler");
    assert_eq!(json["houses"]["system"], "equal");
}

#[test]
fn test_ephemeris_errors_propagate() {
    let snapshot = natal_snapshot();
    let err = compute_chart(&snapshot, NATAL_JD + 1.0, ISTANBUL.0, ISTANBUL.1, HouseSystem::Equal)
        .unwrap_err();
    assert!(matches!(
        err,
        ChartError::Ephemeris(EphemerisError::Unavailable { .. })
    ));

    let err = compute_chart(&snapshot, NATAL_JD, ISTANBUL.0, ISTANBUL.1, HouseSystem::Koch).unwrap_err();
    assert!(matches!(err, ChartError::Ephemeris(_)));
}

#[test]
fn test_non_finite_coordinates_rejected() {
    let snapshot = natal_snapshot();
    let err = compute_chart(&snapshot, NATAL_JD, f64::NAN, ISTANBUL.1, HouseSystem::Equal).unwrap_err();
    assert!(matches!(err, ChartError::InvalidAngle { .. }));
}

#[test]
fn test_narrative_payload() {
    let engine = ChartEngine::new(natal_snapshot());
    let chart = engine
        .compute_chart(NATAL_JD, ISTANBUL.0, ISTANBUL.1, HouseSystem::Equal)
        .unwrap();

    let payload = engine.compose_narrative(&chart, NarrativeStrategy::Dominant);
    assert_eq!(payload.axis, "Yay–İkizler");
    assert_eq!(payload.themes[0].theme, "challenge");
    assert_eq!(payload.themes.len(), 6);
    assert_eq!(payload.focus, "Ufkunu genişletmeye odaklan.");
    assert_eq!(payload.confidence, Some(0.95));
    assert_eq!(payload.derived_from.len(), 2);
    assert_eq!(payload.derived_from[0].pair, "Jupiter–Mars");
    assert_eq!(payload.derived_from[0].aspect, AspectKind::Trine);

    let alternate = engine.compose_narrative(&chart, NarrativeStrategy::Alternate);
    assert_eq!(alternate.axis, "Yengeç–Oğlak");
}

#[test]
fn test_engine_synastry_uses_synastry_orbs() {
    let natal = natal_snapshot();
    let partner = SnapshotEphemeris::from_path(&fixture("partner_snapshot.json")).unwrap();
    let engine = ChartEngine::with_config(natal.clone(), EngineConfig::default());

    let aspects = engine.synastry(&natal.planets, &partner.planets).unwrap();
    assert!(aspects
        .iter()
        .any(|a| a.body_a == "Sun" && a.body_b == "Sun" && a.kind == AspectKind::Conjunction));
    assert!(aspects.iter().all(|a| a.orb <= 8.0));
    // Partner Mars is retrograde
    assert!(aspects.iter().filter(|a| a.body_b == "Mars").all(|a| a.retrograde));
}

struct FixedGeocoder;

#[async_trait]
impl GeocodeProvider for FixedGeocoder {
    async fn resolve(&self, place: &str) -> Result<Location, GeocodeError> {
        if place.eq_ignore_ascii_case("istanbul") {
            Ok(Location {
                label: "Istanbul".to_string(),
                latitude: ISTANBUL.0,
                longitude: ISTANBUL.1,
                timezone: "Europe/Istanbul".to_string(),
            })
        } else {
            Err(GeocodeError::LocationNotFound {
                place: place.to_string(),
            })
        }
    }
}

struct EchoGenerator {
    online: bool,
}

#[async_trait]
impl TextGenerationProvider for EchoGenerator {
    async fn generate(
        &self,
        payload: &NarrativePayload,
        template: &PromptTemplate,
    ) -> Result<Interpretation, GenerationError> {
        if !self.online {
            return Err(GenerationError::unavailable("offline"));
        }
        Ok(Interpretation {
            headline: payload.axis.clone(),
            summary: template.name.clone(),
            advice: payload.focus.clone(),
        })
    }
}

#[tokio::test]
async fn test_geocoded_chart_with_generated_text() {
    let location = FixedGeocoder.resolve("Istanbul").await.unwrap();
    let engine = ChartEngine::new(natal_snapshot());
    let chart = engine
        .compute_chart(NATAL_JD, location.latitude, location.longitude, HouseSystem::Equal)
        .unwrap();
    let payload = engine.compose_narrative(&chart, NarrativeStrategy::Dominant);

    let template = PromptTemplate::default();
    let text = EchoGenerator { online: true }
        .generate(&payload, &template)
        .await
        .unwrap();
    assert_eq!(text.headline, "Yay–İkizler");
    assert_eq!(text.summary, template.name);

    let offline = EchoGenerator { online: false }.generate(&payload, &template).await;
    assert!(matches!(offline, Err(GenerationError::Unavailable { .. })));
}

#[tokio::test]
async fn test_unknown_place() {
    let err = FixedGeocoder.resolve("Atlantis").await.unwrap_err();
    assert_eq!(
        err,
        GeocodeError::LocationNotFound {
            place: "Atlantis".to_string()
        }
    );
}
