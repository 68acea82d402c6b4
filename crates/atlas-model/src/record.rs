//! Territory records and the feature set exchanged between pipeline stages.

use geo::MultiPolygon;

use crate::TerritoryClass;

/// One geographic entity: attributes plus a lon/lat multi-polygon.
///
/// Every non-key attribute is optional so that the dissolve step can apply
/// first-non-null semantics; the dependency-grouping stage blanks all
/// attributes of dependency rows before dissolving into the parent state.
#[derive(Debug, Clone)]
pub struct Territory {
    /// Classification (`TYPE` column). `None` after blanking.
    pub class: Option<TerritoryClass>,
    /// Three-or-more-character code (`WB_A3`). Empty means missing.
    pub code: String,
    /// Continent label (`CONTINENT`); internal, dropped before output.
    pub continent: Option<String>,
    /// UN region (`REGION_UN`).
    pub region_un: Option<String>,
    /// UN subregion (`SUBREGION`).
    pub subregion: Option<String>,
    /// World Bank region (`REGION_WB`).
    pub region_wb: Option<String>,
    /// English name (`NAME_EN`); internal, dropped before output.
    pub name: Option<String>,
    /// Display name (`WB_NAME`).
    pub display_name: Option<String>,
    /// Dissolve key used by the grouping stage; internal only.
    pub group_code: Option<String>,
    /// Boundary geometry in unprojected lon/lat degrees.
    pub geometry: MultiPolygon<f64>,
}

impl Territory {
    /// Create a record with the given code and geometry, everything else unset.
    pub fn new(code: impl Into<String>, geometry: MultiPolygon<f64>) -> Self {
        Self {
            class: None,
            code: code.into(),
            continent: None,
            region_un: None,
            subregion: None,
            region_wb: None,
            name: None,
            display_name: None,
            group_code: None,
            geometry,
        }
    }

    /// The effective dissolve key: the group code when set, else the code.
    pub fn group_key(&self) -> &str {
        self.group_code.as_deref().unwrap_or(&self.code)
    }

    /// True when the code field carries a value.
    pub fn has_code(&self) -> bool {
        !self.code.trim().is_empty()
    }
}

/// Ordered collection of territory records.
///
/// This is the unit of exchange between pipeline stages: each stage consumes
/// a `FeatureSet` and produces a complete new one, so stages stay
/// independently testable.
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    pub records: Vec<Territory>,
}

impl FeatureSet {
    pub fn new(records: Vec<Territory>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: Territory) {
        self.records.push(record);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Territory> {
        self.records.iter()
    }

    /// All codes in record order.
    pub fn codes(&self) -> Vec<String> {
        self.records.iter().map(|r| r.code.clone()).collect()
    }

    /// Look up a record by exact code.
    pub fn find(&self, code: &str) -> Option<&Territory> {
        self.records.iter().find(|r| r.code == code)
    }
}

impl IntoIterator for FeatureSet {
    type Item = Territory;
    type IntoIter = std::vec::IntoIter<Territory>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a FeatureSet {
    type Item = &'a Territory;
    type IntoIter = std::slice::Iter<'a, Territory>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<Territory> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Territory>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
