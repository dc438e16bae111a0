pub mod provider;
pub mod snapshot;
pub mod time;
pub mod types;

#[cfg(feature = "swisseph")]
pub mod adapter;

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisAdapter;
pub use provider::{EphemerisError, EphemerisProvider};
pub use snapshot::SnapshotEphemeris;
pub use time::julian_day;
pub use types::{ChartAngles, GeoLocation, HouseFrame, HouseSystem, PlanetPosition};
