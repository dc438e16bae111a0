mod interpreter;
mod places;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use jovia::ephemeris::{julian_day, EphemerisProvider, GeoLocation};
use jovia::providers::{GeocodeProvider, PromptTemplate, TextGenerationProvider};
use jovia::{compute_synastry_aspects, ChartEngine, HouseSystem, NarrativeStrategy, SnapshotEphemeris};
use jovia_config::{load_settings, JoviaSettings};
use log::info;
use serde_json::json;
use std::path::{Path, PathBuf};

use crate::interpreter::TemplateInterpreter;
use crate::places::PlaceBook;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    /// Narrate the best-scoring axis.
    Dominant,
    /// Narrate the runner-up axis.
    Alternate,
}

impl From<Strategy> for NarrativeStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Dominant => NarrativeStrategy::Dominant,
            Strategy::Alternate => NarrativeStrategy::Alternate,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Natal chart and synastry engine")]
struct Cli {
    /// Engine config (default: $JOVIA_CONFIG, then configs/engine.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a chart and its narrative payload.
    Chart {
        /// Recorded ephemeris JSON; fixes the moment and place.
        #[arg(long, conflicts_with_all = ["datetime", "place", "lat", "lon"])]
        snapshot: Option<PathBuf>,

        /// Birth moment, RFC 3339 (e.g. 1990-01-01T12:00:00+02:00).
        #[arg(long, required_unless_present = "snapshot")]
        datetime: Option<String>,

        /// Place name from the config place book.
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        place: Option<String>,

        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// placidus, whole_sign, koch, equal, regiomontanus, campanus, alcabitius, morinus.
        #[arg(long, value_parser = parse_house_system)]
        house_system: Option<HouseSystem>,

        #[arg(long, value_enum, default_value_t = Strategy::Dominant)]
        strategy: Strategy,

        /// Write the ephemeris data used for this chart to a snapshot file.
        #[arg(long)]
        save_snapshot: Option<PathBuf>,
    },
    /// Aspects between two recorded charts.
    Synastry {
        #[arg(long)]
        first: PathBuf,

        #[arg(long)]
        second: PathBuf,
    },
}

fn parse_house_system(s: &str) -> Result<HouseSystem, String> {
    s.parse::<HouseSystem>().map_err(|e| e.to_string())
}

fn load_snapshot(path: &Path) -> anyhow::Result<SnapshotEphemeris> {
    SnapshotEphemeris::from_path(path)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))
}

#[cfg(feature = "swisseph")]
fn live_ephemeris() -> anyhow::Result<Box<dyn EphemerisProvider>> {
    let adapter = jovia::ephemeris::SwissEphemerisAdapter::new(None)
        .context("Failed to initialise the Swiss Ephemeris")?;
    Ok(Box::new(adapter))
}

#[cfg(not(feature = "swisseph"))]
fn live_ephemeris() -> anyhow::Result<Box<dyn EphemerisProvider>> {
    anyhow::bail!("No live ephemeris compiled in (build with --features swisseph); use --snapshot instead")
}

struct ChartRequest {
    provider: Box<dyn EphemerisProvider>,
    julian_day: f64,
    location: GeoLocation,
    place: Option<String>,
    system: HouseSystem,
}

async fn resolve_request(
    settings: &JoviaSettings,
    snapshot: Option<PathBuf>,
    datetime: Option<String>,
    place: Option<String>,
    coords: (Option<f64>, Option<f64>),
    house_system: Option<HouseSystem>,
) -> anyhow::Result<ChartRequest> {
    if let Some(path) = snapshot {
        let snapshot = load_snapshot(&path)?;
        return Ok(ChartRequest {
            julian_day: snapshot.julian_day,
            location: snapshot.location,
            place: None,
            system: house_system.unwrap_or_else(|| snapshot.house_system()),
            provider: Box::new(snapshot),
        });
    }

    let text = datetime.context("--datetime is required without --snapshot")?;
    let moment: DateTime<Utc> = DateTime::parse_from_rfc3339(&text)
        .with_context(|| format!("Invalid --datetime '{text}'"))?
        .with_timezone(&Utc);

    let (location, label) = match (place, coords) {
        (Some(name), _) => {
            let resolved = PlaceBook::new(settings.places.clone()).resolve(&name).await?;
            info!("{} resolved to ({}, {}) [{}]", resolved.label, resolved.latitude, resolved.longitude, resolved.timezone);
            (
                GeoLocation {
                    lat: resolved.latitude,
                    lon: resolved.longitude,
                },
                Some(resolved.label),
            )
        }
        (None, (Some(lat), Some(lon))) => (GeoLocation { lat, lon }, None),
        _ => anyhow::bail!("Give either --place or both --lat and --lon"),
    };

    Ok(ChartRequest {
        provider: live_ephemeris()?,
        julian_day: julian_day(moment),
        location,
        place: label,
        system: house_system.unwrap_or_default(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    if let Some(source) = &settings.source {
        info!("Using config {}", source.display());
    }

    match cli.command {
        Command::Chart {
            snapshot,
            datetime,
            place,
            lat,
            lon,
            house_system,
            strategy,
            save_snapshot,
        } => {
            let request =
                resolve_request(&settings, snapshot, datetime, place, (lat, lon), house_system).await?;

            if let Some(path) = &save_snapshot {
                let captured = SnapshotEphemeris::capture(
                    request.provider.as_ref(),
                    request.julian_day,
                    request.location,
                    request.system,
                )?;
                std::fs::write(path, captured.to_json()?)
                    .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
                info!("Snapshot written to {}", path.display());
            }

            let engine = ChartEngine::with_config(request.provider.as_ref(), settings.engine.clone());
            let chart = engine.compute_chart(
                request.julian_day,
                request.location.lat,
                request.location.lon,
                request.system,
            )?;
            let payload = engine.compose_narrative(&chart, strategy.into());
            let interpretation = TemplateInterpreter
                .generate(&payload, &PromptTemplate::default())
                .await;

            let output = json!({
                "place": request.place,
                "chart": chart,
                "angles": {
                    "ascendant": chart.houses.angles.ascendant,
                    "midheaven": chart.houses.angles.midheaven,
                    "descendant": chart.houses.angles.descendant(),
                    "imumCoeli": chart.houses.angles.imum_coeli(),
                },
                "narrative": payload,
                "interpretation": match interpretation {
                    Ok(text) => json!(text),
                    Err(e) => json!({ "error": e.to_string() }),
                },
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Synastry { first, second } => {
            let first = load_snapshot(&first)?;
            let second = load_snapshot(&second)?;
            let aspects =
                compute_synastry_aspects(&first.planets, &second.planets, &settings.engine.synastry_orbs)?;
            println!("{}", serde_json::to_string_pretty(&aspects)?);
        }
    }

    Ok(())
}
