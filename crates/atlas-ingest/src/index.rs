//! Index-score table loader.
//!
//! The index dataset is a flat table keyed by territory code and year, with
//! one numeric column per indicator. Parsing failures are surfaced as
//! contextual errors at this boundary; missing numeric cells become absent
//! values rather than errors.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use tracing::debug;

/// One score row: a (code, year) key plus indicator values.
#[derive(Debug, Clone)]
pub struct IndexRow {
    pub code: String,
    pub year: i32,
    pub values: BTreeMap<String, f64>,
}

/// In-memory index-score table.
#[derive(Debug, Clone, Default)]
pub struct IndexTable {
    /// Indicator column names, in file order.
    pub variables: Vec<String>,
    pub rows: Vec<IndexRow>,
}

impl IndexTable {
    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.rows.iter().map(|row| row.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Value for a (code, year, indicator) triple. Absent keys yield `None`.
    pub fn lookup(&self, code: &str, year: i32, variable: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.year == year && row.code == code)
            .and_then(|row| row.values.get(variable).copied())
    }
}

/// Read an index-score CSV.
///
/// Requires `code` and `year` columns (case-insensitive); every other
/// column is treated as an indicator. Non-numeric indicator columns (for
/// example a country-name column) are carried but produce no values.
pub fn load_index_table(path: &Path) -> Result<IndexTable> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("read headers from {}", path.display()))?
        .clone();
    let normalized: Vec<String> = headers
        .iter()
        .map(|header| header.trim().trim_matches('\u{feff}').to_string())
        .collect();

    let code_idx = find_column(&normalized, "code")
        .with_context(|| format!("{}: missing 'code' column", path.display()))?;
    let year_idx = find_column(&normalized, "year")
        .with_context(|| format!("{}: missing 'year' column", path.display()))?;

    let variables: Vec<String> = normalized
        .iter()
        .enumerate()
        .filter(|(idx, name)| {
            *idx != code_idx && *idx != year_idx && !name.eq_ignore_ascii_case("country")
        })
        .map(|(_, name)| name.clone())
        .collect();

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("{}: record {line}", path.display()))?;
        let code = record.get(code_idx).unwrap_or("").trim().to_string();
        if code.is_empty() {
            continue;
        }
        let year_raw = record.get(year_idx).unwrap_or("").trim();
        let Ok(year) = year_raw.parse::<i32>() else {
            bail!("{}: record {line}: invalid year {year_raw:?}", path.display());
        };
        let mut values = BTreeMap::new();
        for (idx, name) in normalized.iter().enumerate() {
            if !variables.contains(name) {
                continue;
            }
            if let Some(cell) = record.get(idx)
                && let Ok(value) = cell.trim().parse::<f64>()
            {
                values.insert(name.clone(), value);
            }
        }
        rows.push(IndexRow { code, year, values });
    }

    debug!(path = %path.display(), rows = rows.len(), variables = variables.len(), "loaded index table");
    Ok(IndexTable { variables, rows })
}

fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("atlas-index-{}.csv", std::process::id()));
        let mut file = std::fs::File::create(&path).expect("create temp csv");
        file.write_all(contents.as_bytes()).expect("write temp csv");
        path
    }

    #[test]
    fn loads_rows_and_skips_non_numeric_cells() {
        let path = write_temp(
            "country,code,year,overall,factor_1\n\
             Atlantis,ATL,2023,0.55,0.61\n\
             Atlantis,ATL,2022,0.54,\n",
        );
        let table = load_index_table(&path).expect("load");
        std::fs::remove_file(&path).ok();

        assert_eq!(table.variables, vec!["overall", "factor_1"]);
        assert_eq!(table.years(), vec![2022, 2023]);
        assert_eq!(table.lookup("ATL", 2023, "overall"), Some(0.55));
        assert_eq!(table.lookup("ATL", 2022, "factor_1"), None);
        assert_eq!(table.lookup("ATL", 2021, "overall"), None);
    }
}
