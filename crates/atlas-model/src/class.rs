//! Territory classification as carried in the source attribute table.
//!
//! The source dataset labels each row with a free-text `TYPE` column.
//! These enums give those labels a closed, typed representation while
//! keeping exact string round-trips with the upstream values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a territory record.
///
/// `SovereignCountry` is the raw upstream label; the cleaning pipeline
/// collapses it to `Country` before output. `Lease` rows are kept but
/// remapped to the `XXX` sentinel code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerritoryClass {
    /// Unified output label for independent states.
    Country,
    /// Raw upstream label for independent states.
    SovereignCountry,
    /// Territory administered by another sovereign state.
    Dependency,
    /// Disputed area sourced from the separate disputed-territories table.
    Disputed,
    /// Leased area; its code is remapped to the sentinel.
    Lease,
}

impl TerritoryClass {
    /// Returns the label as it appears in the source/output attribute table.
    pub fn as_str(&self) -> &'static str {
        match self {
            TerritoryClass::Country => "Country",
            TerritoryClass::SovereignCountry => "Sovereign country",
            TerritoryClass::Dependency => "Dependency",
            TerritoryClass::Disputed => "Disputed",
            TerritoryClass::Lease => "Lease",
        }
    }
}

impl fmt::Display for TerritoryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TerritoryClass {
    type Err = String;

    /// Parse a `TYPE` label (case-insensitive, whitespace-tolerant).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        match normalized.as_str() {
            "COUNTRY" => Ok(TerritoryClass::Country),
            "SOVEREIGN COUNTRY" => Ok(TerritoryClass::SovereignCountry),
            "DEPENDENCY" => Ok(TerritoryClass::Dependency),
            "DISPUTED" => Ok(TerritoryClass::Disputed),
            "LEASE" => Ok(TerritoryClass::Lease),
            _ => Err(format!("Unknown territory type: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_round_trips_source_labels() {
        for label in [
            "Country",
            "Sovereign country",
            "Dependency",
            "Disputed",
            "Lease",
        ] {
            let class = label.parse::<TerritoryClass>().expect("parse class");
            assert_eq!(class.as_str(), label);
        }
    }

    #[test]
    fn class_parse_is_case_insensitive() {
        assert_eq!(
            "sovereign country".parse::<TerritoryClass>().unwrap(),
            TerritoryClass::SovereignCountry
        );
        assert_eq!(
            " DEPENDENCY ".parse::<TerritoryClass>().unwrap(),
            TerritoryClass::Dependency
        );
    }
}
