use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The five major aspects, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    /// Canonical order. Detection checks kinds in exactly this order.
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }

    /// Display label: "Conjunction", "Square", ...
    pub fn label(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Conjunction",
            AspectKind::Sextile => "Sextile",
            AspectKind::Square => "Square",
            AspectKind::Trine => "Trine",
            AspectKind::Opposition => "Opposition",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.name() == wanted)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Allowed orb per aspect kind. Always complete: every kind has a finite, non-negative orb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct OrbTable {
    orbs: [f64; 5],
}

impl OrbTable {
    /// Orbs used for aspects inside one natal chart.
    pub fn natal() -> Self {
        Self {
            orbs: [8.0, 6.0, 6.0, 6.0, 8.0],
        }
    }

    /// Orbs used between two charts.
    pub fn synastry() -> Self {
        Self {
            orbs: [8.0, 4.0, 6.0, 6.0, 8.0],
        }
    }

    /// Build from explicit entries; every kind must appear exactly once.
    pub fn from_entries<I>(entries: I) -> Result<Self, ChartError>
    where
        I: IntoIterator<Item = (AspectKind, f64)>,
    {
        let mut orbs: [Option<f64>; 5] = [None; 5];
        for (kind, orb) in entries {
            if !orb.is_finite() || orb < 0.0 {
                return Err(ChartError::InvalidOrbTable {
                    message: format!("orb for {} must be a finite non-negative number, got {}", kind.name(), orb),
                    missing: vec![],
                });
            }
            if orbs[kind.index()].replace(orb).is_some() {
                return Err(ChartError::InvalidOrbTable {
                    message: format!("orb for {} given twice", kind.name()),
                    missing: vec![],
                });
            }
        }

        let missing: Vec<AspectKind> = AspectKind::ALL
            .into_iter()
            .filter(|kind| orbs[kind.index()].is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ChartError::InvalidOrbTable {
                message: format!(
                    "missing orbs for {}",
                    missing.iter().map(|k| k.name()).collect::<Vec<_>>().join(", ")
                ),
                missing,
            });
        }

        let mut complete = [0.0; 5];
        for (slot, orb) in complete.iter_mut().zip(orbs) {
            *slot = orb.unwrap_or_default();
        }
        Ok(Self { orbs: complete })
    }

    /// Build from names such as "square" = 6.0, as read from configuration.
    pub fn from_named(entries: &BTreeMap<String, f64>) -> Result<Self, ChartError> {
        let mut parsed = Vec::with_capacity(entries.len());
        for (name, orb) in entries {
            let kind = AspectKind::from_name(name).ok_or_else(|| ChartError::InvalidOrbTable {
                message: format!("unknown aspect type '{}'", name),
                missing: vec![],
            })?;
            parsed.push((kind, *orb));
        }
        Self::from_entries(parsed)
    }

    pub fn orb(&self, kind: AspectKind) -> f64 {
        self.orbs[kind.index()]
    }

    /// Copy of this table with one orb replaced.
    pub fn with_orb(&self, kind: AspectKind, orb: f64) -> Result<Self, ChartError> {
        let entries = AspectKind::ALL
            .into_iter()
            .map(|k| (k, if k == kind { orb } else { self.orb(k) }));
        Self::from_entries(entries)
    }

    pub fn max_orb(&self) -> f64 {
        self.orbs.iter().copied().fold(0.0, f64::max)
    }
}

impl Default for OrbTable {
    fn default() -> Self {
        Self::natal()
    }
}

impl TryFrom<BTreeMap<String, f64>> for OrbTable {
    type Error = ChartError;

    fn try_from(entries: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::from_named(&entries)
    }
}

impl From<OrbTable> for BTreeMap<String, f64> {
    fn from(table: OrbTable) -> Self {
        AspectKind::ALL
            .into_iter()
            .map(|kind| (kind.name().to_string(), table.orb(kind)))
            .collect()
    }
}

/// An aspect between two bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aspect {
    pub body_a: String,
    pub body_b: String,
    #[serde(rename = "type")]
    pub kind: AspectKind,
    /// Measured angular separation (0-180)
    pub exact_angle: f64,
    /// Deviation from the kind's exact angle
    pub orb: f64,
    /// Whether the aspect is applying (approaching exact)
    pub applying: bool,
    /// Whether the aspect is exact (within 0.1 degrees)
    pub exact: bool,
    /// Whether either planet is retrograde
    pub retrograde: bool,
}

impl Aspect {
    pub fn involves(&self, body: &str) -> bool {
        self.body_a.eq_ignore_ascii_case(body) || self.body_b.eq_ignore_ascii_case(body)
    }

    /// True when the aspect joins these two bodies, in either order.
    pub fn joins(&self, first: &str, second: &str) -> bool {
        (self.body_a.eq_ignore_ascii_case(first) && self.body_b.eq_ignore_ascii_case(second))
            || (self.body_a.eq_ignore_ascii_case(second) && self.body_b.eq_ignore_ascii_case(first))
    }

    /// "Mars Trine Jupiter"
    pub fn label(&self) -> String {
        format!("{} {} {}", self.body_a, self.kind.label(), self.body_b)
    }

    /// The same aspect with the two bodies exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            body_a: self.body_b.clone(),
            body_b: self.body_a.clone(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        assert_eq!(OrbTable::natal().orb(AspectKind::Sextile), 6.0);
        assert_eq!(OrbTable::synastry().orb(AspectKind::Sextile), 4.0);
        assert_eq!(OrbTable::natal().max_orb(), 8.0);
    }

    #[test]
    fn test_missing_kind_is_reported() {
        let err = OrbTable::from_entries([
            (AspectKind::Conjunction, 8.0),
            (AspectKind::Square, 6.0),
            (AspectKind::Opposition, 8.0),
        ])
        .unwrap_err();
        match err {
            ChartError::InvalidOrbTable { missing, .. } => {
                assert_eq!(missing, vec![AspectKind::Sextile, AspectKind::Trine]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_values_rejected() {
        assert!(OrbTable::natal().with_orb(AspectKind::Trine, -1.0).is_err());
        assert!(OrbTable::natal().with_orb(AspectKind::Trine, f64::NAN).is_err());
        let mut named = BTreeMap::new();
        for kind in AspectKind::ALL {
            named.insert(kind.name().to_string(), 5.0);
        }
        named.insert("quincunx".to_string(), 2.0);
        assert!(OrbTable::from_named(&named).is_err());
    }

    #[test]
    fn test_named_table_from_json() {
        let table: OrbTable = serde_json::from_str(
            r#"{"conjunction": 10, "sextile": 3, "square": 7, "trine": 7, "opposition": 9}"#,
        )
        .unwrap();
        assert_eq!(table.orb(AspectKind::Opposition), 9.0);
        assert!(serde_json::from_str::<OrbTable>(r#"{"conjunction": 10}"#).is_err());
    }
}
