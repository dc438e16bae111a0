use crate::degrees::SignPosition;
use crate::ephemeris::PlanetPosition;
use crate::error::ChartError;
use crate::houses::HouseCusps;
use serde::Serialize;

/// A body with its sign and house resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedPlanet {
    #[serde(flatten)]
    pub position: PlanetPosition,
    pub sign: SignPosition,
    /// House 1-12; None when the chart has no house frame
    pub house: Option<u8>,
}

impl PlacedPlanet {
    pub fn place(position: PlanetPosition, cusps: Option<&HouseCusps>) -> Result<Self, ChartError> {
        let house = match cusps {
            Some(cusps) => Some(cusps.house_of(position.lon)?),
            None => None,
        };
        Ok(Self {
            sign: SignPosition::from_longitude(position.lon),
            house,
            position,
        })
    }

    pub fn name(&self) -> &str {
        &self.position.name
    }
}

/// Place every body; fails on the first body that cannot be housed.
pub fn place_all(
    positions: &[PlanetPosition],
    cusps: Option<&HouseCusps>,
) -> Result<Vec<PlacedPlanet>, ChartError> {
    positions
        .iter()
        .cloned()
        .map(|position| PlacedPlanet::place(position, cusps))
        .collect()
}
