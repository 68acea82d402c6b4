//! Left-join of index scores onto boundary records.

use anyhow::{Result, bail};
use tracing::debug;

use atlas_ingest::IndexTable;
use atlas_model::FeatureSet;

/// Scores aligned with a feature set, one slot per record.
///
/// Join semantics are a left join on code: a record without a score for
/// the requested (variable, year) keeps a `None` slot and renders as
/// missing, it is never an error. A year or variable entirely absent from
/// the table therefore yields an all-`None` column.
#[derive(Debug, Clone)]
pub struct ScoreColumn {
    pub variable: String,
    pub year: i32,
    pub values: Vec<Option<f64>>,
}

impl ScoreColumn {
    /// Number of records with a score.
    pub fn matched(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    /// Observed (min, max) over present scores.
    pub fn range(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for value in self.values.iter().flatten() {
            bounds = Some(match bounds {
                None => (*value, *value),
                Some((min, max)) => (min.min(*value), max.max(*value)),
            });
        }
        bounds
    }

    /// Normalize a score into `[0, 1]` against the observed range.
    ///
    /// A constant column maps to the ramp midpoint.
    pub fn normalize(&self, value: f64) -> f64 {
        match self.range() {
            Some((min, max)) if max > min => (value - min) / (max - min),
            _ => 0.5,
        }
    }
}

/// Join one (variable, year) column of the index table onto the set.
///
/// The variable must exist in the table; a missing year is ordinary
/// missing data.
pub fn merge_scores(
    set: &FeatureSet,
    table: &IndexTable,
    variable: &str,
    year: i32,
) -> Result<ScoreColumn> {
    if !table.variables.iter().any(|name| name == variable) {
        bail!(
            "unknown variable '{variable}'; available: {}",
            table.variables.join(", ")
        );
    }
    let values: Vec<Option<f64>> = set
        .iter()
        .map(|record| table.lookup(&record.code, year, variable))
        .collect();
    let column = ScoreColumn {
        variable: variable.to_string(),
        year,
        values,
    };
    debug!(
        variable,
        year,
        records = set.len(),
        matched = column.matched(),
        "merged scores"
    );
    Ok(column)
}
