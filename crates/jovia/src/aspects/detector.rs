use crate::aspects::types::{Aspect, AspectKind, OrbTable};
use crate::degrees::{angular_separation, checked_finite, checked_longitude, normalize_degrees};
use crate::ephemeris::PlanetPosition;
use crate::error::ChartError;
use log::debug;
use std::collections::HashSet;

/// Within 0.1 degrees is "exact"
const EXACT_THRESHOLD: f64 = 0.1;
/// Relative speeds below this (degrees/day) are treated as stationary
const STATIONARY_SPEED: f64 = 0.01;
/// Forward step used to judge applying vs separating (days)
const APPLYING_STEP: f64 = 0.1;

/// Finds major aspects between bodies using an injected orb table.
#[derive(Debug, Clone, Default)]
pub struct AspectDetector {
    orbs: OrbTable,
}

impl AspectDetector {
    pub fn new(orbs: OrbTable) -> Self {
        Self { orbs }
    }

    pub fn orbs(&self) -> &OrbTable {
        &self.orbs
    }

    /// Classify an angular separation (0-180).
    ///
    /// Kinds are checked in canonical order and the first one within its orb wins, so a
    /// separation can never produce two aspects even when orbs overlap.
    pub fn classify(&self, separation: f64) -> Option<(AspectKind, f64)> {
        AspectKind::ALL.into_iter().find_map(|kind| {
            let deviation = (separation - kind.angle()).abs();
            (deviation <= self.orbs.orb(kind)).then_some((kind, deviation))
        })
    }

    /// Calculate the aspect between two bodies, if any
    pub fn calculate_aspect(&self, a: &PlanetPosition, b: &PlanetPosition) -> Option<Aspect> {
        let separation = angular_separation(a.lon, b.lon);
        let (kind, orb) = self.classify(separation)?;

        Some(Aspect {
            body_a: a.name.clone(),
            body_b: b.name.clone(),
            kind,
            exact_angle: separation,
            orb,
            applying: is_applying(a, b, kind.angle(), separation),
            exact: orb < EXACT_THRESHOLD,
            retrograde: a.speed_lon < 0.0 || b.speed_lon < 0.0,
        })
    }

    /// Aspects within one chart.
    ///
    /// Each unordered pair is considered once, with the name-ordered smaller body as
    /// `body_a`. Output order follows the input order of `body_a`, then `body_b`.
    pub fn natal_aspects(&self, bodies: &[PlanetPosition]) -> Result<Vec<Aspect>, ChartError> {
        validate_bodies(bodies)?;

        let mut aspects = Vec::new();
        for a in bodies {
            for b in bodies {
                if a.name < b.name {
                    if let Some(aspect) = self.calculate_aspect(a, b) {
                        aspects.push(aspect);
                    }
                }
            }
        }

        debug!("{} natal aspects among {} bodies", aspects.len(), bodies.len());
        Ok(aspects)
    }

    /// Aspects between two charts: every body of `first` against every body of `second`.
    pub fn synastry_aspects(
        &self,
        first: &[PlanetPosition],
        second: &[PlanetPosition],
    ) -> Result<Vec<Aspect>, ChartError> {
        validate_bodies(first)?;
        validate_bodies(second)?;

        let aspects: Vec<Aspect> = first
            .iter()
            .flat_map(|a| second.iter().filter_map(move |b| self.calculate_aspect(a, b)))
            .collect();

        debug!(
            "{} synastry aspects between {} and {} bodies",
            aspects.len(),
            first.len(),
            second.len()
        );
        Ok(aspects)
    }
}

/// Synastry aspects between two position sets with an explicit orb table.
pub fn compute_synastry_aspects(
    first: &[PlanetPosition],
    second: &[PlanetPosition],
    orbs: &OrbTable,
) -> Result<Vec<Aspect>, ChartError> {
    AspectDetector::new(orbs.clone()).synastry_aspects(first, second)
}

/// Names must be unique ignoring case; longitudes and speeds must be finite.
fn validate_bodies(bodies: &[PlanetPosition]) -> Result<(), ChartError> {
    let mut seen = HashSet::with_capacity(bodies.len());
    for body in bodies {
        checked_longitude(body.lon, &format!("{} longitude", body.name))?;
        checked_finite(body.speed_lon, &format!("{} speed", body.name))?;
        if !seen.insert(body.name.to_ascii_lowercase()) {
            return Err(ChartError::DuplicateBody {
                name: body.name.clone(),
            });
        }
    }
    Ok(())
}

/// Fold a signed longitude difference into a separation in [0, 180].
fn folded_separation(signed_diff: f64) -> f64 {
    let wrapped = normalize_degrees(signed_diff + 180.0) - 180.0;
    wrapped.abs()
}

/// Determine if an aspect is applying (approaching exact) or separating
fn is_applying(a: &PlanetPosition, b: &PlanetPosition, aspect_angle: f64, separation: f64) -> bool {
    let relative_speed = a.speed_lon - b.speed_lon;

    // Bodies moving together neither apply nor separate
    if relative_speed.abs() < STATIONARY_SPEED {
        return false;
    }

    let current_distance = (separation - aspect_angle).abs();
    let future_angle = folded_separation(a.lon - b.lon + relative_speed * APPLYING_STEP);
    let future_distance = (future_angle - aspect_angle).abs();

    future_distance < current_distance
}
