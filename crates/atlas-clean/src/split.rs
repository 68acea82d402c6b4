//! Targeted geometry split: explode one country's multi-polygon, relabel
//! one part, re-merge by corrected code.
//!
//! The shipped rule separates Taiwan out of the China multi-polygon. Part
//! selection is content-based by default (a reference point the wanted
//! part must contain); a legacy positional index survives as
//! a compatibility selector, valid only while upstream part ordering is
//! stable.

use anyhow::{Context, Result, bail};
use geo::{Contains, Point};
use tracing::{debug, warn};

use atlas_model::{FeatureSet, Territory};

use crate::dissolve::dissolve_by_code;
use crate::explode::explode;

/// How to pick the part to relabel out of the exploded parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartSelector {
    /// Positional index into the exploded part list (compatibility mode).
    Index(usize),
    /// The part containing this lon/lat reference point.
    ContainsPoint { lon: f64, lat: f64 },
}

/// One split rule: which code to explode and how to relabel the part.
#[derive(Debug, Clone)]
pub struct SplitRule {
    pub target_code: String,
    pub selector: PartSelector,
    pub new_code: String,
    pub new_name: String,
    pub new_display_name: String,
}

impl SplitRule {
    /// The shipped China/Taiwan rule with the content-based selector.
    ///
    /// Reference point sits inland of Taiwan; the legacy positional selector picked
    /// the same part as exploded index 31.
    pub fn china_taiwan() -> Self {
        Self {
            target_code: "CHN".to_string(),
            selector: PartSelector::ContainsPoint {
                lon: 121.0,
                lat: 23.7,
            },
            new_code: "TWN".to_string(),
            new_name: "Taiwan".to_string(),
            new_display_name: "Taiwan".to_string(),
        }
    }

    /// The same rule with legacy positional part selection.
    pub fn china_taiwan_positional() -> Self {
        Self {
            selector: PartSelector::Index(31),
            ..Self::china_taiwan()
        }
    }
}

/// Apply a split rule, returning the full set with the target replaced by
/// its dissolved split results, appended at the end.
pub fn apply_split(set: FeatureSet, rule: &SplitRule) -> Result<FeatureSet> {
    let mut rest = FeatureSet::default();
    let mut parts: Vec<Territory> = Vec::new();
    for record in set {
        if record.code == rule.target_code {
            parts.extend(explode(&record));
        } else {
            rest.push(record);
        }
    }
    if parts.is_empty() {
        // Same policy as a rule-table key miss: no-op, but never silent.
        warn!(target = %rule.target_code, "split target not present in dataset");
        return Ok(rest);
    }

    let selected = select_part(&parts, rule.selector)
        .with_context(|| format!("select part for {}", rule.new_code))?;
    let part = &mut parts[selected];
    part.code = rule.new_code.clone();
    part.name = Some(rule.new_name.clone());
    part.display_name = Some(rule.new_display_name.clone());
    debug!(
        target = %rule.target_code,
        new_code = %rule.new_code,
        part_index = selected,
        part_count = parts.len(),
        "relabeled split part"
    );

    let dissolved = dissolve_by_code(FeatureSet::new(parts));
    for record in dissolved {
        rest.push(record);
    }
    Ok(rest)
}

fn select_part(parts: &[Territory], selector: PartSelector) -> Result<usize> {
    match selector {
        PartSelector::Index(index) => {
            if index >= parts.len() {
                bail!("part index {index} out of range ({} parts)", parts.len());
            }
            Ok(index)
        }
        PartSelector::ContainsPoint { lon, lat } => {
            let point = Point::new(lon, lat);
            parts
                .iter()
                .position(|part| part.geometry.contains(&point))
                .ok_or_else(|| {
                    anyhow::anyhow!("no exploded part contains reference point ({lon}, {lat})")
                })
        }
    }
}
