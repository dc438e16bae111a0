use async_trait::async_trait;
use jovia::providers::{GeocodeError, GeocodeProvider, Location};
use jovia_config::PlaceEntry;
use log::warn;

/// Offline geocoder backed by the `[[places]]` table of engine.toml.
pub struct PlaceBook {
    places: Vec<PlaceEntry>,
}

impl PlaceBook {
    pub fn new(places: Vec<PlaceEntry>) -> Self {
        Self { places }
    }
}

#[async_trait]
impl GeocodeProvider for PlaceBook {
    async fn resolve(&self, place: &str) -> Result<Location, GeocodeError> {
        let wanted = place.trim();
        match self
            .places
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(wanted))
        {
            Some(entry) => Ok(Location {
                label: entry.name.clone(),
                latitude: entry.latitude,
                longitude: entry.longitude,
                timezone: entry.timezone.clone(),
            }),
            None => {
                warn!("'{}' is not in the place book ({} entries)", wanted, self.places.len());
                Err(GeocodeError::LocationNotFound {
                    place: wanted.to_string(),
                })
            }
        }
    }
}
