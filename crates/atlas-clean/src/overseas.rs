//! Territory classifier: split one sovereign territory into mainland and
//! overseas parts by bounding-box membership.
//!
//! A part is mainland when its bounding rectangle lies fully inside the
//! rule's fixed reference box; everything else is overseas. The overseas
//! group becomes a separate dependency record with a suffixed code, so one
//! input code yields two output codes.

use anyhow::Result;
use geo::{BoundingRect, Rect, coord};
use tracing::{debug, warn};

use atlas_model::{FeatureSet, OVERSEAS_SUFFIX, Territory, TerritoryClass};

use crate::dissolve::dissolve_by_code;
use crate::explode::explode;

/// One overseas-split rule.
#[derive(Debug, Clone)]
pub struct OverseasRule {
    /// Sovereign code whose geometry is classified.
    pub code: String,
    /// Parts fully inside this lon/lat box are mainland.
    pub mainland_bounds: Rect<f64>,
    /// Code assigned to the overseas group.
    pub overseas_code: String,
    /// Display-name suffix for the overseas group.
    pub overseas_label: String,
}

impl OverseasRule {
    pub fn new(code: &str, mainland_bounds: Rect<f64>) -> Self {
        Self {
            code: code.to_string(),
            mainland_bounds,
            overseas_code: format!("{code}{OVERSEAS_SUFFIX}"),
            overseas_label: "overseas territories".to_string(),
        }
    }

    /// The shipped rule: metropolitan France vs. its overseas parts.
    pub fn france() -> Self {
        Self::new(
            "FRA",
            Rect::new(coord! { x: -5.5, y: 41.0 }, coord! { x: 10.0, y: 51.5 }),
        )
    }
}

/// Apply an overseas rule. Records with other codes pass through; the
/// target's mainland and overseas groups are dissolved separately and
/// appended. Returns the set unchanged (apart from dissolving the target)
/// when every part is mainland.
pub fn apply_overseas_split(set: FeatureSet, rule: &OverseasRule) -> Result<FeatureSet> {
    let mut rest = FeatureSet::default();
    let mut parts: Vec<Territory> = Vec::new();
    for record in set {
        if record.code == rule.code {
            parts.extend(explode(&record));
        } else {
            rest.push(record);
        }
    }
    if parts.is_empty() {
        warn!(code = %rule.code, "overseas split target not present in dataset");
        return Ok(rest);
    }

    let mut mainland = 0usize;
    let mut overseas = 0usize;
    for part in &mut parts {
        if is_mainland(part, &rule.mainland_bounds) {
            mainland += 1;
        } else {
            overseas += 1;
            part.code = rule.overseas_code.clone();
            part.class = Some(TerritoryClass::Dependency);
            part.name = part
                .name
                .as_ref()
                .map(|name| format!("{name} ({})", rule.overseas_label));
            part.display_name = part
                .display_name
                .as_ref()
                .map(|name| format!("{name} ({})", rule.overseas_label));
            // Overseas parts leave the sovereign's regional grouping.
            part.subregion = None;
            part.region_wb = None;
        }
    }
    debug!(
        code = %rule.code,
        overseas_code = %rule.overseas_code,
        mainland_parts = mainland,
        overseas_parts = overseas,
        "classified territory parts"
    );

    let dissolved = dissolve_by_code(FeatureSet::new(parts));
    for mut record in dissolved {
        // The overseas record groups under its own code, not the parent.
        record.group_code = Some(record.code.clone());
        rest.push(record);
    }
    Ok(rest)
}

fn is_mainland(part: &Territory, bounds: &Rect<f64>) -> bool {
    let Some(rect) = part.geometry.bounding_rect() else {
        return false;
    };
    rect.min().x >= bounds.min().x
        && rect.min().y >= bounds.min().y
        && rect.max().x <= bounds.max().x
        && rect.max().y <= bounds.max().y
}
