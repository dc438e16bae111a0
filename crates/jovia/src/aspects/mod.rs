pub mod detector;
pub mod types;

pub use detector::{compute_synastry_aspects, AspectDetector};
pub use types::{Aspect, AspectKind, OrbTable};
